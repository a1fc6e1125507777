// Report assembly: turns computed stats into text or JSON

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{PeriodPerformance, StockStats, WindowExtremes};

const VALUE_WIDTH: usize = 13;
// The short period line is one column narrower than the long one
const SHORT_TREND_WIDTH: usize = 12;
const LONG_TREND_WIDTH: usize = 13;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Format a float with fixed decimals, optionally with `,` thousands groups
pub fn format_number(value: f64, decimals: usize, group: bool) -> String {
    let raw = format!("{:.*}", decimals, value);
    if !group || !value.is_finite() {
        return raw;
    }

    let (sign, digits) = split_sign(&raw);
    match digits.split_once('.') {
        Some((int_part, frac_part)) => format!("{}{}.{}", sign, group_digits(int_part), frac_part),
        None => format!("{}{}", sign, group_digits(digits)),
    }
}

/// Format an integer, optionally with `,` thousands groups
pub fn format_integer(value: i64, group: bool) -> String {
    let raw = value.to_string();
    if !group {
        return raw;
    }

    let (sign, digits) = split_sign(&raw);
    format!("{}{}", sign, group_digits(digits))
}

fn split_sign(raw: &str) -> (&str, &str) {
    match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw),
    }
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Human-readable report for one symbol
pub struct TextReport<'a> {
    pub symbol: &'a str,
    pub stats: &'a StockStats,
    pub short_length: usize,
    pub long_length: usize,
    pub group_thousands: bool,
}

impl TextReport<'_> {
    fn num(&self, value: f64, decimals: usize) -> String {
        format_number(value, decimals, self.group_thousands)
    }

    fn int(&self, value: i64) -> String {
        format_integer(value, self.group_thousands)
    }

    fn write_periods(
        &self,
        f: &mut fmt::Formatter<'_>,
        length: usize,
        width: usize,
        extremes: Option<&WindowExtremes>,
    ) -> fmt::Result {
        match extremes {
            Some(extremes) => {
                self.write_period(f, "Worst", width, &extremes.worst)?;
                self.write_period(f, "Best", width, &extremes.best)
            }
            None => {
                for label in ["Worst", "Best"] {
                    writeln!(
                        f,
                        "{:<5} {:>2} day period: n/a (need {} days)",
                        label, length, length
                    )?;
                }
                Ok(())
            }
        }
    }

    fn write_period(
        &self,
        f: &mut fmt::Formatter<'_>,
        label: &str,
        width: usize,
        period: &PeriodPerformance,
    ) -> fmt::Result {
        writeln!(
            f,
            "{:<5} {:>2} day period: {} to {} ={:>width$}",
            label,
            period.length,
            period.start_date,
            period.end_date,
            self.num(period.trend, 1),
            width = width
        )
    }

    fn write_extreme(
        &self,
        f: &mut fmt::Formatter<'_>,
        label: &str,
        value: String,
        date: NaiveDate,
    ) -> fmt::Result {
        writeln!(f, "{:>15}:{:>w$} on {}", label, value, date, w = VALUE_WIDTH)
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.stats;
        let w = VALUE_WIDTH;

        writeln!(f, "stockstats ({})", env!("CARGO_PKG_VERSION"))?;
        writeln!(f, "Stock: \"{}\"", self.symbol)?;
        writeln!(f, "From: {} to {}", s.first_date, s.last_date)?;
        writeln!(f, "# Days: {}", self.int(s.days as i64))?;
        writeln!(f)?;
        writeln!(f)?;

        writeln!(f, "Historical")?;
        self.write_extreme(f, "Low price", self.num(s.min_price.price, 2), s.min_price.date)?;
        self.write_extreme(f, "High price", self.num(s.max_price.price, 2), s.max_price.date)?;
        self.write_extreme(f, "Low volume", self.int(s.min_volume.volume), s.min_volume.date)?;
        self.write_extreme(f, "High volume", self.int(s.max_volume.volume), s.max_volume.date)?;
        writeln!(f, "{:>15}:{:>w$}", "Mean close", self.num(s.mean_close, 2))?;
        writeln!(f, "{:>15}:{:>w$}", "Mean volume", self.num(s.mean_volume as f64, 1))?;
        writeln!(f, "{:>15}:{:>w$}", "Volume stddev", self.num(s.volume_std_dev, 1))?;
        writeln!(f, "Median stock price:{:>w$}", self.num(s.median, 1))?;
        writeln!(f)?;

        self.write_periods(f, self.short_length, SHORT_TREND_WIDTH, s.short_window.as_ref())?;
        writeln!(f)?;
        self.write_periods(f, self.long_length, LONG_TREND_WIDTH, s.long_window.as_ref())
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    symbol: &'a str,
    #[serde(flatten)]
    stats: &'a StockStats,
}

/// Serialize the full stats bundle, tagged with the symbol
pub fn render_json(symbol: &str, stats: &StockStats) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport { symbol, stats })
}
