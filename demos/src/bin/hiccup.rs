// Copyright 2020 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Samples scheduling jitter ("hiccups") once a second and appends each
//! interval to an hdr interval log, either on stdout or a file given with
//! `-f`. Stop with Ctrl-C.

use std::io::Write;
use std::time::{Duration, Instant};

use rustcommon_histogram::IntervalRecorder;

struct Config {
    interval: u64,
    filename: Option<String>,
}

const USAGE: &str = "hiccup [-i <interval>] [-f <filename>]\n\
  interval: <number> Time in seconds between samples (default 1).\n\
  filename: <string> Name of the file to log to (default stdout).\n";

fn parse_args() -> Option<Config> {
    let mut interval = 1u64;
    let mut filename = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-i" => {
                interval = args.next()?.parse().ok().filter(|v| *v >= 1)?;
            }
            "-f" => {
                filename = Some(args.next()?);
            }
            "-h" | "--help" => return None,
            _ => return None,
        }
    }
    Some(Config { interval, filename })
}

fn main() {
    env_logger::init();

    let config = match parse_args() {
        Some(config) => config,
        None => {
            print!("{USAGE}");
            return;
        }
    };

    let mut output: Box<dyn Write> = match &config.filename {
        Some(path) => match std::fs::OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Box::new(file),
            Err(error) => {
                eprintln!("failed to open/create file: {path}, {error}");
                std::process::exit(1);
            }
        },
        None => Box::new(std::io::stdout()),
    };

    let recorder = IntervalRecorder::new(1, 24 * 60 * 60 * 1_000_000, 3)
        .expect("failed to init interval recorder");

    let hiccup_thread_recorder = std::sync::Arc::new(recorder);
    {
        let recorder = std::sync::Arc::clone(&hiccup_thread_recorder);
        std::thread::spawn(move || loop {
            let poll_start = Instant::now();
            std::thread::sleep(Duration::from_millis(1));
            let observed = poll_start.elapsed();
            let delta_us = observed.as_micros().saturating_sub(1000) as u64;
            recorder.record(delta_us);
        });
    }

    let program_start = rustcommon_histogram::clock::wall_clock_now();
    rustcommon_histogram::log::write_header(
        &mut output,
        "foobar",
        program_start.0 as f64 + program_start.1 as f64 / 1000.0,
    )
    .expect("failed to write log header");

    let mut interval_start = Instant::now();
    loop {
        std::thread::sleep(Duration::from_secs(config.interval));

        let snapshot = hiccup_thread_recorder.sample();
        let interval_end = Instant::now();

        let start_secs = interval_start.elapsed().as_secs_f64();
        let end_secs = interval_end.duration_since(interval_start).as_secs_f64();
        interval_start = interval_end;

        if let Err(error) =
            rustcommon_histogram::log::write_interval(&mut output, start_secs, end_secs, &snapshot)
        {
            log::error!("failed to write interval: {error}");
        }
        let _ = output.flush();
    }
}
