//! CSV parsers for `sd_style_table.csv` and `common_prompts.csv`.

use std::path::Path;

use anyhow::Context as _;

use crate::model::{CommonPrompts, StyleTable, normalize_prompt};

use super::ContentParser;

/// Prompt × style table. Row 0 is the header; cell 0 of each row is the prompt.
pub struct StyleTableParser;

impl ContentParser for StyleTableParser {
    type Output = StyleTable;

    const FILE_NAME: &'static str = "sd_style_table.csv";

    fn parse(content: &str, path: &Path) -> anyhow::Result<StyleTable> {
        let mut records = read_records(content, path)?.into_iter();
        let headers = records
            .next()
            .ok_or_else(|| anyhow::anyhow!("missing header row in {}", path.display()))?;
        let rows = records
            .map(|mut row| {
                if let Some(prompt) = row.first_mut() {
                    *prompt = normalize_prompt(prompt);
                }
                row
            })
            .collect();
        Ok(StyleTable { headers, rows })
    }
}

/// Auxiliary table of per-category prompt fragments, kept raw.
pub struct CommonPromptsParser;

impl ContentParser for CommonPromptsParser {
    type Output = CommonPrompts;

    const FILE_NAME: &'static str = "common_prompts.csv";

    fn parse(content: &str, path: &Path) -> anyhow::Result<CommonPrompts> {
        Ok(CommonPrompts {
            rows: read_records(content, path)?,
        })
    }
}

/// Read every record as raw string cells, dropping trailing blank rows.
///
/// Blank rows inside the table are kept so row positions stay stable.
fn read_records(content: &str, path: &Path) -> anyhow::Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.trim().as_bytes());
    let mut out = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| {
            format!("invalid CSV in {} (record {})", path.display(), line + 1)
        })?;
        out.push(record.iter().map(str::to_string).collect::<Vec<String>>());
    }
    while out
        .last()
        .is_some_and(|row| row.iter().all(String::is_empty))
    {
        out.pop();
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> &'static Path {
        Path::new("/tmp/m/sd_style_table.csv")
    }

    #[test]
    fn header_and_rows_keep_order() {
        let content = "Prompt,Oil,Ink\n\"1girl,solo\",7,8\n\"a cat\",9,\n";
        let table = StyleTableParser::parse(content, path()).expect("parse ok");
        assert_eq!(table.headers, vec!["Prompt", "Oil", "Ink"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec!["1girl, solo", "7", "8"]);
        assert_eq!(table.rows[1], vec!["a cat", "9", ""]);
    }

    #[test]
    fn only_prompt_cell_is_normalized() {
        let content = "Prompt,Style\n\"a,b\",\"1,2\"\n";
        let table = StyleTableParser::parse(content, path()).expect("parse ok");
        assert_eq!(table.rows[0], vec!["a, b", "1,2"]);
    }

    #[test]
    fn no_type_coercion_and_ragged_rows() {
        let content = "Prompt,007,true\nx,0012\n";
        let table = StyleTableParser::parse(content, path()).expect("parse ok");
        assert_eq!(table.headers, vec!["Prompt", "007", "true"]);
        assert_eq!(table.rows[0], vec!["x", "0012"]);
    }

    #[test]
    fn trailing_blank_rows_are_dropped() {
        let content = "Prompt,A\nx,1\n,\n\n\n";
        let table = StyleTableParser::parse(content, path()).expect("parse ok");
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn interior_blank_rows_keep_positions() {
        let content = "Prompt,A\nfirst,1\n,\nthird,3\n,\n";
        let table = StyleTableParser::parse(content, path()).expect("parse ok");
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[1], vec!["", ""]);
        assert_eq!(table.rows[2], vec!["third", "3"]);
    }

    #[test]
    fn style_table_requires_header() {
        assert!(StyleTableParser::parse("  \n", path()).is_err());
    }

    #[test]
    fn common_prompts_may_be_empty_and_stay_raw() {
        let p = Path::new("/tmp/m/common_prompts.csv");
        assert!(CommonPromptsParser::parse("", p).unwrap().rows.is_empty());
        let cp = CommonPromptsParser::parse("Quality\n\"best,quality,\"\n", p).unwrap();
        assert_eq!(cp.rows[1], vec!["best,quality,"]);
    }
}
