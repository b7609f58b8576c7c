use std::fmt;

use async_trait::async_trait;
use nt_core::{RawReport, ReportGenerator, ReportPrompt, ReportStyle, Result};

/// Response object type the canned structured report is wrapped in.
const WRAPPER_KIND: &str = "TeamRunResponse";

const STRUCTURED_REPORT: &str = "### Politics
1. **City council approves new transit budget**
   The council voted 7-2 to expand bus service across the outer districts.
   [Read more](https://example.com/politics/transit-budget) (Metro Daily, May 22, 2025)

2. **Mayor announces housing task force**
   A new panel will review zoning rules over the next six months.
   [Read more](https://example.com/politics/housing-task-force) (City Herald, May 21, 2025)

### Sports
1. **Local club wins regional final**
   A late goal sealed the title in front of a record crowd.
   [Read more](https://example.com/sports/regional-final) (Sports Desk, May 21, 2025)

### Local News
1. **Major road repairs begin downtown**
   Lane closures are expected through the end of the month.
   [Read more](https://example.com/local/road-repairs) (Neighborhood Post, May 20, 2025)
";

const NARRATIVE_REPORT: &str = "# Local News Roundup

## Executive Summary
Transit funding, housing policy and road repairs lead this week's coverage.

## Main Story
The city council approved an expanded transit budget after a lengthy debate.

## Key Takeaways
- Bus service will grow in the outer districts
- A housing task force starts work next month
- Expect downtown lane closures

---
Report compiled by the dummy generator
";

/// Offline generator that returns canned reports.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReportGenerator for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn generate(&self, prompt: &ReportPrompt) -> Result<RawReport> {
        tracing::debug!("Dummy generator ignoring {} byte prompt", prompt.text.len());
        Ok(match prompt.style {
            ReportStyle::Structured => RawReport::wrapped(WRAPPER_KIND, STRUCTURED_REPORT),
            ReportStyle::Narrative => RawReport::Text(NARRATIVE_REPORT.to_string()),
        })
    }
}
