//! Interactive natal chart and Q&A console.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use log::info;

use pythia::InterpretationIndex;
use urania::ephemeris::{SwissConfig, SwissEphemeris};
use urania::geo::{GeocoderConfig, MapsCoGeocoder};
use urania::{BirthQuery, ChartBuilder, ZodiacMode};

fn main() -> Result<()> {
    env_logger::init();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let date_text = prompt(&mut lines, "Birth date (YYYY-MM-DD): ")?;
    let date = NaiveDate::parse_from_str(date_text.trim(), "%Y-%m-%d")
        .context("expected a date like 1994-03-24")?;

    let time_text = prompt(&mut lines, "Birth time, 24h (HH:MM): ")?;
    let time = NaiveTime::parse_from_str(time_text.trim(), "%H:%M")
        .context("expected a time like 00:40")?;

    let place = prompt(&mut lines, "Birth place (city, country): ")?;

    let mode_text = prompt(&mut lines, "Zodiac [tropical/sidereal]: ")?;
    let mode = match mode_text.trim().to_lowercase().as_str() {
        "" | "sidereal" | "vedic" => ZodiacMode::Sidereal,
        "tropical" | "western" => ZodiacMode::Tropical,
        other => anyhow::bail!("unknown zodiac mode {:?}", other),
    };

    let query = BirthQuery {
        year: date.year(),
        month: date.month(),
        day: date.day(),
        hour: time.hour(),
        minute: time.minute(),
        place: place.trim().to_string(),
    };

    let gateway = SwissEphemeris::new(SwissConfig::default())?;
    let geocoder = MapsCoGeocoder::new(GeocoderConfig::default())?;
    let builder = ChartBuilder::new(&gateway, &geocoder);

    info!("computing {:?} chart for {}", mode, query.place);
    let chart = builder.build(&query, mode)?;
    println!("{}", serde_json::to_string_pretty(&chart)?);

    let index = InterpretationIndex::builtin();
    println!();
    for line in pythia::chart_interpretations(&chart, index) {
        println!("* {}", line);
    }

    println!("\nAsk about your chart (empty line to quit).");
    loop {
        print!("? ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let question = line?;
        if question.trim().is_empty() {
            break;
        }
        println!("{}\n", pythia::answer(&chart, index, &question));
    }

    Ok(())
}

fn prompt(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    label: &str,
) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let line = lines
        .next()
        .context("input ended before all birth details were read")??;
    Ok(line)
}
