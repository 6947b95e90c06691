// Drives the compiled binary through a PTY so the real event loop and
// crossterm input handling get exercised end to end.
//
// - Requires a TTY; expectrl allocates a pseudo terminal.
// - Unix-only and ignored by default.
// - Run manually via: `cargo test --test integration_min_session -- --ignored`.

#![cfg(unix)]

use std::time::Duration;

use expectrl::{spawn, Eof};

#[test]
#[ignore]
fn minimal_session_plays_a_round_and_exits() -> Result<(), Box<dyn std::error::Error>> {
    let bin = assert_cmd::cargo::cargo_bin("subitize");
    // a fixed count makes any digit path deterministic
    let cmd = format!(
        "{} --mode timed --min-dots 3 --max-dots 3 --seed 7",
        bin.display()
    );

    let mut p = spawn(cmd)?;
    std::thread::sleep(Duration::from_millis(200));

    // start a round from the start screen
    p.send("\r")?;
    std::thread::sleep(Duration::from_millis(200));

    p.send("3")?;
    std::thread::sleep(Duration::from_millis(200));

    // ESC stops the round, a second ESC quits from the start screen
    p.send("\x1b")?;
    std::thread::sleep(Duration::from_millis(100));
    p.send("\x1b")?;

    p.expect(Eof)?;
    Ok(())
}
