// ABOUTME: Terminal front-end for alphabet-magic
// ABOUTME: Pick a letter, hear the riddle, choose an option, save the reward picture

use alphabet_magic::audio::CpalContext;
use alphabet_magic::game::reward::{fetch_reward, RewardState};
use alphabet_magic::game::round::{CORRECT_REVEAL_DELAY, WRONG_RESET_DELAY};
use alphabet_magic::game::state::THINKING_MESSAGE;
use alphabet_magic::game::{
    Difficulty, Game, GameState, OptionOutcome, RiddleGenerator, SoundEffect, SoundEffects,
};
use alphabet_magic::playback::PlayOutcome;
use alphabet_magic::{GameConfig, GeminiClient, SpeechPlaybackController};
use clap::Parser;
use std::future::Future;
use std::io::Write;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Alphabet Magic riddle game
#[derive(Parser, Debug)]
#[command(name = "alphabet-magic")]
#[command(about = "Letter riddles for kids, read aloud", long_about = None)]
struct Args {
    /// TOML config file
    #[arg(short, long, env = "ALPHABET_MAGIC_CONFIG")]
    config: Option<PathBuf>,

    /// Start with this letter instead of asking
    #[arg(short, long)]
    letter: Option<char>,

    /// Riddle difficulty (easy, medium, hard)
    #[arg(short, long)]
    difficulty: Option<Difficulty>,

    /// Turn off click/pop/correct/wrong feedback
    #[arg(long)]
    no_sound_effects: bool,

    /// Do not open an audio device; riddles are not read aloud
    #[arg(long)]
    mute: bool,

    /// Directory the reward pictures are written to
    #[arg(long, default_value = ".")]
    reward_dir: PathBuf,
}

/// Terminal bell for answers, log line for the rest
struct TerminalEffects;

impl SoundEffects for TerminalEffects {
    fn play(&self, effect: SoundEffect) {
        match effect {
            SoundEffect::Correct | SoundEffect::Wrong => {
                print!("\x07");
                let _ = std::io::stdout().flush();
            }
            _ => log::debug!("sfx {} at volume {}", effect, effect.volume()),
        }
    }
}

type Input = Lines<BufReader<Stdin>>;

/// A riddle read that runs alongside the answer prompt
type Reading<'a> = Pin<Box<dyn Future<Output = PlayOutcome> + 'a>>;

fn print_prompt(text: &str) {
    print!("{}", text);
    let _ = std::io::stdout().flush();
}

async fn prompt(input: &mut Input, text: &str) -> Option<String> {
    print_prompt(text);
    input.next_line().await.ok().flatten().map(|l| l.trim().to_string())
}

/// Resolves when the pending read does; never resolves without one
async fn wait_for(reading: &mut Option<Reading<'_>>) -> PlayOutcome {
    match reading {
        Some(reading) => reading.await,
        None => std::future::pending().await,
    }
}

/// Sleep for `delay` while the pending read keeps going
async fn pause_while_reading(reading: &mut Option<Reading<'_>>, delay: Duration) {
    let pause = tokio::time::sleep(delay);
    tokio::pin!(pause);
    loop {
        tokio::select! {
            _ = &mut pause => return,
            outcome = wait_for(reading) => {
                log::debug!("Riddle reading finished: {:?}", outcome);
                *reading = None;
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();

    let mut config = GameConfig::load(args.config.as_deref())?;
    if args.no_sound_effects {
        config.sound_effects = false;
    }
    if args.difficulty.is_some() {
        config.difficulty = args.difficulty;
    }

    let client = Arc::new(GeminiClient::from_config(&config)?);
    let mut game = Game::from_config(client.clone(), &config, Arc::new(TerminalEffects));

    let context = if args.mute {
        None
    } else {
        match CpalContext::new() {
            Ok(context) => Some(context),
            Err(e) => {
                log::warn!("Riddles will not be read aloud: {}", e);
                None
            }
        }
    };
    let speech = SpeechPlaybackController::new(client.clone(), context);

    let mut input: Input = BufReader::new(tokio::io::stdin()).lines();
    let mut next_letter = args.letter;

    println!("✨ Alphabet Magic ✨");
    loop {
        let letter = match next_letter.take() {
            Some(letter) => letter,
            None => match prompt(&mut input, "\nPick a letter (A-Z, or q to quit): ").await {
                Some(line) if line.eq_ignore_ascii_case("q") => break,
                Some(line) => match line.chars().next() {
                    Some(c) => c,
                    None => continue,
                },
                None => break,
            },
        };

        let letter = match game.begin_letter(letter) {
            Ok(letter) => letter,
            Err(_) => {
                println!("That's not a letter!");
                continue;
            }
        };
        println!("{} {}", letter, THINKING_MESSAGE);
        let generated = client.generate_riddle(letter, game.difficulty()).await;
        if let Err(e) = game.finish_letter(generated) {
            log::debug!("Riddle request failed: {}", e);
            if let Some(banner) = game.error() {
                println!("Oh no! {}", banner);
            }
            continue;
        }

        let Some(riddle) = game.riddle().cloned() else {
            continue;
        };
        println!("\n  {}\n  \"{}\"\n", riddle.letter, riddle.question);
        for (i, option) in riddle.options.iter().enumerate() {
            println!("  {}. {}", i + 1, option);
        }

        let mut reading: Option<Reading<'_>> = game.round().map(|round| {
            Box::pin(round.auto_read(&speech, config.autoplay_delay())) as Reading<'_>
        });

        while game.state() == GameState::Playing {
            print_prompt("\nYour answer (number, r = read again, b = back): ");
            let line = loop {
                tokio::select! {
                    line = input.next_line() => break line.ok().flatten(),
                    outcome = wait_for(&mut reading) => {
                        log::debug!("Riddle reading finished: {:?}", outcome);
                        reading = None;
                    }
                }
            };
            let Some(line) = line else {
                speech.close();
                return Ok(());
            };

            match line.trim() {
                "r" | "R" => {
                    if reading.is_some() || speech.is_playing() {
                        println!("Still reading...");
                    } else if let Some(round) = game.round() {
                        reading = Some(Box::pin(round.read_aloud(&speech)));
                    }
                    continue;
                }
                "b" | "B" => {
                    if let Some(round) = game.round() {
                        round.press_back();
                    }
                    reading = None;
                    speech.cancel();
                    game.back_to_menu();
                    continue;
                }
                _ => {}
            }

            let Some(option) = line
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| riddle.options.get(i))
            else {
                println!("Pick a number from 1 to {}", riddle.options.len());
                continue;
            };

            let Some(round) = game.round_mut() else { break };
            round.press_down(option);
            match round.choose(option) {
                OptionOutcome::Correct => {
                    reading = None;
                    speech.cancel();
                    tokio::time::sleep(CORRECT_REVEAL_DELAY).await;
                    game.correct();
                }
                OptionOutcome::Wrong => {
                    println!("Not quite, try again!");
                    pause_while_reading(&mut reading, WRONG_RESET_DELAY).await;
                    round.clear_wrong();
                }
                OptionOutcome::Ignored => {}
            }
        }

        if let Some(word) = game.reward_word().map(str::to_string) {
            println!("\nCorrect! The answer is {}!", word.to_uppercase());
            println!("{}", RewardState::Loading.message().unwrap_or_default());
            match fetch_reward(client.as_ref(), &word).await {
                RewardState::Ready(image) => {
                    let path = args
                        .reward_dir
                        .join(format!("{}.{}", word.to_lowercase(), image.extension()));
                    match image.bytes().map(|bytes| std::fs::write(&path, bytes)) {
                        Ok(Ok(())) => println!("Your prize is at {}", path.display()),
                        Ok(Err(e)) => log::error!("Failed to save reward: {}", e),
                        Err(e) => log::error!("Failed to decode reward: {}", e),
                    }
                }
                other => println!("{}", other.message().unwrap_or_default()),
            }
            game.play_again();
        }
    }

    speech.close();
    Ok(())
}
