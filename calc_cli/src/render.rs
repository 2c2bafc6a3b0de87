//! Plain-text rendering of calculator results.

use std::fmt::Write;

use calc_core::calculations::fraction::DecimalOutcome;
use calc_core::calculations::{
    BaseResult, BmiResult, ConversionResult, CountdownResult, DecimalResult, FractionResult, GenerationResult,
    GrowthResult, Statistics, TextResult,
};
use calc_core::format::{format_fixed, format_grouped, format_value, Precision};
use calc_core::ToolOutput;

/// Render a result for the terminal. Empty output renders as an empty string.
pub fn render(output: &ToolOutput, precision: Precision) -> String {
    match output {
        ToolOutput::Empty => String::new(),
        ToolOutput::Conversion(r) => conversion(r, precision),
        ToolOutput::Statistics(r) => statistics(r, precision),
        ToolOutput::Growth(r) => growth(r),
        ToolOutput::DecimalToFraction(r) => fraction(r, precision),
        ToolOutput::FractionToDecimal(r) => decimal(r),
        ToolOutput::Base(r) => bases(r),
        ToolOutput::Bmi(r) => bmi(r),
        ToolOutput::Countdown(r) => countdown(r),
        ToolOutput::Text(r) => text(r),
        ToolOutput::Generation(r) => generation(r),
    }
}

fn conversion(r: &ConversionResult, precision: Precision) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {} =", format_value(r.input_value, precision), r.from_unit);
    let width = r.values.iter().map(|v| format_value(v.value, precision).len()).max().unwrap_or(0);
    for v in &r.values {
        let _ = writeln!(
            out,
            "  {:>width$} {} ({})",
            format_value(v.value, precision),
            v.unit,
            v.name,
            width = width
        );
    }
    out
}

fn list(values: &[f64], precision: Precision) -> String {
    values
        .iter()
        .map(|v| format_value(*v, precision))
        .collect::<Vec<_>>()
        .join(", ")
}

fn statistics(s: &Statistics, precision: Precision) -> String {
    let f = |v: f64| format_value(v, precision);
    let mode = if s.mode.is_empty() {
        "no mode (all values unique)".to_string()
    } else {
        format!("{} (x{})", list(&s.mode, precision), s.mode_frequency)
    };
    let outliers = if s.outliers.is_empty() {
        "none".to_string()
    } else {
        list(&s.outliers, precision)
    };

    let rows = [
        ("Count", s.count.to_string()),
        ("Sum", f(s.sum)),
        ("Mean", f(s.mean)),
        ("Median", f(s.median)),
        ("Mode", mode),
        ("Min", f(s.min)),
        ("Max", f(s.max)),
        ("Range", f(s.range)),
        ("Q1", f(s.q1)),
        ("Q3", f(s.q3)),
        ("IQR", f(s.iqr)),
        ("Fences", format!("[{}, {}]", f(s.lower_fence), f(s.upper_fence))),
        ("Outliers", outliers),
        ("Std dev (pop.)", f(s.population_std_dev)),
        ("Std dev (sample)", f(s.sample_std_dev)),
        ("Variance (pop.)", f(s.population_variance)),
        ("Variance (sample)", f(s.sample_variance)),
    ];

    let mut out = String::new();
    for (label, value) in rows {
        let _ = writeln!(out, "{:<18} {}", label, value);
    }
    out
}

fn growth(r: &GrowthResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Period:               {} y {} m {} d ({} years)",
        r.period.years,
        r.period.months,
        r.period.days,
        format_fixed(r.total_years, 4)
    );
    let _ = writeln!(out, "CAGR:                 {}%", format_fixed(r.cagr_percent, 3));
    let _ = writeln!(out, "Total return:         {}%", format_fixed(r.total_return_percent, 2));
    let _ = writeln!(out, "Simple annual return: {}%", format_fixed(r.simple_annual_return_percent, 2));
    let _ = writeln!(out, "Return multiple:      {}x", format_fixed(r.return_multiple, 4));
    match r.doubling_time_years {
        Some(t) => {
            let _ = writeln!(out, "Doubling time:        {} years", format_fixed(t, 2));
        }
        None => {
            let _ = writeln!(out, "Doubling time:        n/a (no growth)");
        }
    }
    out
}

fn fraction(r: &FractionResult, precision: Precision) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Fraction: {}", r.fraction);
    let _ = writeln!(out, "Mixed:    {}", r.mixed);
    let _ = writeln!(out, "Value:    {}", format_value(r.value, precision));
    out
}

fn decimal(r: &DecimalResult) -> String {
    match &r.outcome {
        DecimalOutcome::Undefined => "Undefined (division by zero)\n".to_string(),
        DecimalOutcome::Value(e) => {
            let mut out = String::new();
            let _ = writeln!(out, "Decimal:  {}", e.render_overbar());
            if !e.repeating.is_empty() {
                let _ = writeln!(out, "Notation: {}", e.render_parenthesized());
                let _ = writeln!(out, "Repeats:  {} ({} digits)", e.repeating, e.repeating.chars().count());
            }
            if let Some(f) = r.simplified {
                let _ = writeln!(out, "Simplest: {}", f);
            }
            out
        }
    }
}

fn bases(r: &BaseResult) -> String {
    format!(
        "Binary:      {}\nOctal:       {}\nDecimal:     {}\nHexadecimal: {}\n",
        r.binary, r.octal, r.decimal, r.hexadecimal
    )
}

fn bmi(r: &BmiResult) -> String {
    format!(
        "BMI:          {}\nCategory:     {}\nHealthy band: {} - {} kg\n",
        format_fixed(r.bmi, 1),
        r.category.label(),
        format_fixed(r.healthy_min_kg, 1),
        format_fixed(r.healthy_max_kg, 1)
    )
}

fn countdown(r: &CountdownResult) -> String {
    if r.is_christmas {
        return "Merry Christmas! It's Christmas Day.\n".to_string();
    }
    format!(
        "Christmas {}: {} days, {} hours, {} minutes, {} seconds\n",
        r.target_year, r.days, r.hours, r.minutes, r.seconds
    )
}

fn text(r: &TextResult) -> String {
    let s = &r.stats;
    let mut out = String::new();
    let _ = writeln!(out, "Characters:           {}", format_grouped(s.characters as f64, 0));
    let _ = writeln!(out, "Characters (no space): {}", format_grouped(s.characters_no_spaces as f64, 0));
    let _ = writeln!(out, "Words:                {}", format_grouped(s.words as f64, 0));
    let _ = writeln!(out, "Sentences:            {}", s.sentences);
    let _ = writeln!(out, "Paragraphs:           {}", s.paragraphs);
    let _ = writeln!(out, "Reading time:         {} min", s.reading_minutes);
    for limit in &r.limits {
        let status = if limit.within_limit { "[OK]" } else { "[OVER]" };
        let _ = writeln!(
            out,
            "  {:<20} {:>7} left of {} {}",
            limit.platform, limit.remaining, limit.max_chars, status
        );
    }
    if let Some(converted) = &r.converted {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", converted);
    }
    out
}

fn generation(r: &GenerationResult) -> String {
    format!(
        "{} ({}-{}), year {} of {}\n",
        r.generation.name, r.generation.start_year, r.generation.end_year, r.year_in_range, r.range_years
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_core::{Settings, ToolInput};

    fn render_json(json: &str) -> String {
        let input: ToolInput = serde_json::from_str(json).unwrap();
        render(&input.run(&Settings::default()).unwrap(), Precision::Auto)
    }

    #[test]
    fn test_empty_renders_nothing() {
        assert_eq!(render(&ToolOutput::Empty, Precision::Auto), "");
    }

    #[test]
    fn test_render_conversion() {
        let out = render_json(r#"{"tool":"conversion","dimension":"length","value":1,"from_unit":"mi","to_unit":"km"}"#);
        assert!(out.contains("1.609344 km"));
    }

    #[test]
    fn test_render_repeating_decimal() {
        let out = render_json(r#"{"tool":"fraction_to_decimal","numerator":1,"denominator":6}"#);
        assert!(out.contains("0.1(6)"));
        assert!(out.contains("Simplest: 1/6"));
    }

    #[test]
    fn test_render_undefined() {
        let out = render_json(r#"{"tool":"fraction_to_decimal","numerator":1,"denominator":0}"#);
        assert!(out.starts_with("Undefined"));
    }

    #[test]
    fn test_render_statistics() {
        let out = render_json(r#"{"tool":"statistics","data":"1 2 3"}"#);
        assert!(out.contains("no mode"));
        assert!(out.contains("Mean"));
    }
}
