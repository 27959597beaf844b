//! Build a small report and print it row by row

use sheet_builder::prelude::*;

fn main() -> Result<()> {
    let workbook = WorkbookBuilder::new().build(|w| {
        w.sheet("Report", |s| {
            s.row(|r| {
                r.cell("Region")?.cell("Units")?.cell("On target")?;
                Ok(())
            })?;
            for (region, units) in [("North", 120), ("South", 95), ("West", 143)] {
                s.row(|r| {
                    r.cell(region)?.cell(units)?.cell(units >= 100)?;
                    Ok(())
                })?;
            }
            Ok(())
        })?;
        Ok(())
    })?;

    let sheet = workbook
        .worksheet_by_name("Report")
        .ok_or_else(|| Error::SheetNotFound("Report".into()))?;

    for row in sheet.rows() {
        let texts: Vec<String> = row.cells().iter().map(|c| c.value().to_string()).collect();
        println!("{:>3} | {}", row.number(), texts.join(" | "));
    }

    Ok(())
}
