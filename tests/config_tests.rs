//! Command-line and environment options.

use std::env;

use blockfall::config::{Options, TICK_MS};
use blockfall::{Event, Game};
use clap::Parser;
use serial_test::serial;

const TICK_VAR: &str = "BLOCKFALL_TICK_MS";
const SEED_VAR: &str = "BLOCKFALL_SEED";

fn clear_env() {
    env::remove_var(TICK_VAR);
    env::remove_var(SEED_VAR);
}

#[test]
#[serial]
fn defaults_without_flags() {
    clear_env();

    let options = Options::try_parse_from(["blockfall"]).unwrap();

    assert_eq!(options, Options::default());
    assert_eq!(options.tick_ms, TICK_MS);
    assert_eq!(options.seed, None);
}

#[test]
#[serial]
fn flags_override_defaults() {
    clear_env();

    let options = Options::try_parse_from(["blockfall", "--tick-ms", "120", "--seed", "9"]).unwrap();

    assert_eq!(options.tick_ms, 120);
    assert_eq!(options.seed, Some(9));
}

#[test]
#[serial]
fn zero_tick_interval_is_rejected() {
    clear_env();

    assert!(Options::try_parse_from(["blockfall", "--tick-ms", "0"]).is_err());
}

#[test]
#[serial]
fn environment_supplies_options() {
    clear_env();
    env::set_var(TICK_VAR, "250");
    env::set_var(SEED_VAR, "77");

    let options = Options::try_parse_from(["blockfall"]);
    clear_env();

    let options = options.unwrap();
    assert_eq!(options.tick_ms, 250);
    assert_eq!(options.seed, Some(77));
}

#[test]
#[serial]
fn flag_wins_over_environment() {
    clear_env();
    env::set_var(SEED_VAR, "77");

    let options = Options::try_parse_from(["blockfall", "--seed", "3"]);
    clear_env();

    assert_eq!(options.unwrap().seed, Some(3));
}

#[test]
fn seeded_sessions_replay_identically() {
    let options = Options {
        seed: Some(5),
        ..Options::default()
    };
    let mut first = Game::with_options(&options);
    let mut second = Game::with_options(&options);

    for _ in 0..200 {
        first.handle(Event::Tick);
        second.handle(Event::Tick);
    }

    assert_eq!(first.state(), second.state());
    assert_eq!(first.take_events(), second.take_events());
}
