use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, NaiveDateTime};
use period_core::{ParseOptions, Period};
use tracing::{debug, info_span};

use crate::cli::{AddToArgs, BetweenArgs, NormaliseArgs, PairArgs, ParseArgs, PeriodArgs, ScaleArgs};
use crate::types::{AddToResult, DurationResult, EncodeResult, Instant};

pub fn run_parse(args: &ParseArgs) -> Result<Period> {
    let options = ParseOptions::new().with_mode(args.mode.into());
    let span = info_span!("parse", mode = %options.mode);
    let _guard = span.enter();
    Period::parse_with(&args.period, &options).with_context(|| format!("parse {}", args.period))
}

pub fn run_normalise(args: &NormaliseArgs) -> Result<Period> {
    let period = parse_verbatim(&args.period)?;
    let normalised = period
        .normalise(!args.imprecise)
        .with_context(|| format!("normalise {period}"))?;
    debug!(%period, %normalised, imprecise = args.imprecise, "normalised");
    Ok(normalised)
}

pub fn run_add(args: &PairArgs) -> Result<Period> {
    let (lhs, rhs) = parse_pair(args)?;
    lhs.add(&rhs).with_context(|| format!("add {lhs} and {rhs}"))
}

pub fn run_subtract(args: &PairArgs) -> Result<Period> {
    let (lhs, rhs) = parse_pair(args)?;
    lhs.subtract(&rhs)
        .with_context(|| format!("subtract {rhs} from {lhs}"))
}

pub fn run_scale(args: &ScaleArgs) -> Result<Period> {
    let period = parse_period(&args.period)?;
    let scaled = match args.factor.split_once('/') {
        Some((numerator, denominator)) => {
            let numerator: i64 = numerator
                .trim()
                .parse()
                .with_context(|| format!("ratio numerator '{numerator}'"))?;
            let denominator: i64 = denominator
                .trim()
                .parse()
                .with_context(|| format!("ratio denominator '{denominator}'"))?;
            if denominator == 0 {
                bail!("ratio '{}' has a zero denominator", args.factor);
            }
            period.rational_scale(numerator, denominator)
        }
        None => {
            let factor: f64 = args
                .factor
                .trim()
                .parse()
                .with_context(|| format!("scale factor '{}'", args.factor))?;
            period.scale(factor)
        }
    };
    scaled.with_context(|| format!("scale {period} by {}", args.factor))
}

pub fn run_duration(args: &PeriodArgs) -> Result<DurationResult> {
    let period = parse_period(&args.period)?;
    let (elapsed, precise) = period.duration();
    Ok(DurationResult {
        period,
        elapsed,
        precise,
    })
}

pub fn run_add_to(args: &AddToArgs) -> Result<AddToResult> {
    let period = parse_period(&args.period)?;
    let start = parse_instant(&args.instant)?;
    let (end, precise) = match start {
        Instant::Date(date) => period
            .add_to(date)
            .map(|(date, precise)| (Instant::Date(date), precise)),
        Instant::DateTime(date_time) => period
            .add_to(date_time)
            .map(|(date_time, precise)| (Instant::DateTime(date_time), precise)),
    }
    .with_context(|| format!("add {period} to {start}"))?;
    Ok(AddToResult {
        period,
        start,
        end,
        precise,
    })
}

pub fn run_between(args: &BetweenArgs) -> Result<Period> {
    let start = parse_instant(&args.start)?;
    let end = parse_instant(&args.end)?;
    Period::between(start.to_date_time(), end.to_date_time())
        .with_context(|| format!("period between {start} and {end}"))
}

pub fn run_encode(args: &PeriodArgs) -> Result<EncodeResult> {
    let period = parse_period(&args.period)?;
    Ok(EncodeResult {
        period,
        bytes: period.to_bytes(),
    })
}

fn parse_period(text: &str) -> Result<Period> {
    Period::parse(text).with_context(|| format!("parse {text}"))
}

fn parse_verbatim(text: &str) -> Result<Period> {
    Period::parse_with(text, &ParseOptions::verbatim()).with_context(|| format!("parse {text}"))
}

fn parse_pair(args: &PairArgs) -> Result<(Period, Period)> {
    Ok((parse_period(&args.lhs)?, parse_period(&args.rhs)?))
}

/// Accepts `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS[.fff]`.
pub fn parse_instant(text: &str) -> Result<Instant> {
    let text = text.trim();
    if text.contains('T') {
        let date_time = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
            .with_context(|| format!("invalid date-time '{text}'"))?;
        return Ok(Instant::DateTime(date_time));
    }
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{text}'"))?;
    Ok(Instant::Date(date))
}
