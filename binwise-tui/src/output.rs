//! Plain-text and JSON renderings for the one-shot commands.

use std::io::{self, Write};

use binwise_core::{
    ClassificationResult, FieldKind, FootprintReport, MatchKind, QuizSection, RegionCode,
    RegionMeta, SearchOutcome,
};
use serde::Serialize;

use crate::cli::OutputFormat;

/// One lookup as printed by `classify` and `search`.
#[derive(Debug, Serialize)]
pub(crate) struct Lookup<'result> {
    pub region: &'result RegionCode,
    pub input: &'result str,
    pub outcome: &'result SearchOutcome,
}

pub(crate) fn print_lookup<W: Write>(
    out: &mut W,
    lookup: &Lookup<'_>,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => print_json(out, lookup),
        OutputFormat::Table => match lookup.outcome {
            SearchOutcome::Found(result) => print_result(out, lookup.region, result),
            SearchOutcome::NotFound => writeln!(
                out,
                "No material recognised in {:?}. Try naming it, e.g. \"glass jar\" or \"newspaper\".",
                lookup.input
            ),
        },
    }
}

fn print_result<W: Write>(
    out: &mut W,
    region: &RegionCode,
    result: &ClassificationResult,
) -> io::Result<()> {
    let bin = &result.bin;
    writeln!(out, "Region:    {region}")?;
    writeln!(out, "Material:  {}", result.material)?;
    writeln!(out, "Bin:       {} [{}]", bin.name, bin.color)?;
    if !bin.description.is_empty() {
        writeln!(out, "About:     {}", bin.description)?;
    }
    if !bin.example_items.is_empty() {
        writeln!(out, "Examples:  {}", bin.example_items.join(", "))?;
    }
    if let Some(notes) = &bin.notes {
        writeln!(out, "Note:      {notes}")?;
    }
    writeln!(out, "Advice:    {}", result.advice)?;
    writeln!(out, "Matched:   {}", match_label(result.matched_by))
}

pub(crate) fn match_label(kind: MatchKind) -> &'static str {
    match kind {
        MatchKind::Keyword => "bin keyword",
        MatchKind::ExampleItem => "example item",
        MatchKind::Fallback => "general waste fallback",
        MatchKind::Terminal => "no usable region data",
    }
}

pub(crate) fn print_regions<W: Write>(
    out: &mut W,
    regions: &[RegionMeta],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => print_json(out, &regions),
        OutputFormat::Table => {
            for region in regions {
                writeln!(out, "{:<4}{}", region.code, region.name)?;
            }
            Ok(())
        }
    }
}

pub(crate) fn print_questionnaire<W: Write>(
    out: &mut W,
    sections: &[QuizSection],
    format: OutputFormat,
) -> io::Result<()> {
    if format == OutputFormat::Json {
        return print_json(out, &sections);
    }

    for (position, section) in sections.iter().enumerate() {
        if position > 0 {
            writeln!(out)?;
        }
        writeln!(out, "== {} ==", section.title)?;
        for field in section.fields {
            let marker = if field.required { "*" } else { " " };
            writeln!(out, "{marker} {} ({})", field.label, field.name)?;
            if field.kind == FieldKind::Choice {
                for option in field.options {
                    writeln!(out, "    - {option}")?;
                }
            }
        }
    }
    writeln!(out)?;
    writeln!(out, "* required")
}

pub(crate) fn print_report<W: Write>(
    out: &mut W,
    report: &FootprintReport,
    format: OutputFormat,
) -> io::Result<()> {
    if format == OutputFormat::Json {
        return print_json(out, report);
    }

    let comparison = if report.is_above_average() {
        "above"
    } else {
        "below"
    };
    writeln!(
        out,
        "Lifetime footprint: {:.1} t CO2e ({:.1}% {comparison} average)",
        report.total_co2_lifetime,
        report.percent_above_average.abs()
    )?;
    writeln!(out, "Top contributors:   {}", report.top_contributors.join(", "))?;
    writeln!(out, "Recommendations:")?;
    for recommendation in &report.recommendations {
        writeln!(out, "  - {recommendation}")?;
    }
    Ok(())
}

fn print_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use binwise_core::{BinDefinition, MaterialClass, QUESTIONNAIRE};

    use super::*;

    fn found() -> SearchOutcome {
        SearchOutcome::Found(ClassificationResult {
            bin: BinDefinition {
                name: "Biotonne (Organic Bin)".to_owned(),
                color: "brown".to_owned(),
                description: "Food scraps".to_owned(),
                example_items: vec!["Banana peel".to_owned(), "Tea bags".to_owned()],
                notes: None,
            },
            material: MaterialClass::Organic,
            advice: "No plastic bags.".to_owned(),
            matched_by: MatchKind::Keyword,
        })
    }

    fn render(outcome: &SearchOutcome, format: OutputFormat) -> String {
        let region = RegionCode::new("DE");
        let lookup = Lookup {
            region: &region,
            input: "banana peel",
            outcome,
        };
        let mut out = Vec::new();
        print_lookup(&mut out, &lookup, format).expect("write to vec");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn table_shows_bin_and_examples() {
        let text = render(&found(), OutputFormat::Table);
        assert!(text.contains("Bin:       Biotonne (Organic Bin) [brown]"));
        assert!(text.contains("Examples:  Banana peel, Tea bags"));
        assert!(!text.contains("Note:"));
    }

    #[test]
    fn not_found_is_worded_differently() {
        let text = render(&SearchOutcome::NotFound, OutputFormat::Table);
        assert!(text.starts_with("No material recognised in \"banana peel\""));
    }

    #[test]
    fn json_carries_status_tag() {
        let value: serde_json::Value =
            serde_json::from_str(&render(&found(), OutputFormat::Json)).expect("json");
        assert_eq!(value["region"], "DE");
        assert_eq!(value["outcome"]["status"], "found");
        assert_eq!(value["outcome"]["material"], "organic");

        let value: serde_json::Value =
            serde_json::from_str(&render(&SearchOutcome::NotFound, OutputFormat::Json))
                .expect("json");
        assert_eq!(value["outcome"]["status"], "not_found");
    }

    #[test]
    fn questionnaire_marks_required_fields() {
        let mut out = Vec::new();
        print_questionnaire(&mut out, QUESTIONNAIRE, OutputFormat::Table).expect("write");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.starts_with("== Personal Details =="));
        assert!(text.contains("* What is your approximate age range? (age_range)"));
        assert!(text.contains("    - 18-30 years"));
    }
}
