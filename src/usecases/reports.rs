//! Report generation: the fixed KPI report and user-customised reports.
//!
//! Both resolve the `date_range` phrase into `start_date`/`end_date` and hand
//! back a download link when the backend provides one.

use super::context::{ActionContext, OK, put_present};
use crate::domain::formatter::field_text;
use crate::domain::{BackendRequest, DomainError, OutgoingMessage, Slot, Slots};
use crate::ports::ActionHandler;
use serde_json::{Map, Value};
use tracing::{debug, error, warn};

const GENERATE_ENDPOINT: &str = "/reports/generate";
const CUSTOMIZE_ENDPOINT: &str = "/reports/customize";
const DEFAULT_FORMAT: &str = "pdf";
const DEFAULT_CUSTOM_REPORT_TYPE: &str = "performance";

/// Slot values shared by both report actions.
struct ReportSlots {
    date_range: Option<String>,
    format: Option<String>,
    metric_type: Option<String>,
}

impl ReportSlots {
    fn from_slots(slots: &Slots) -> Self {
        Self {
            date_range: slots.get(Slot::DateRange),
            format: slots.get(Slot::Format),
            metric_type: slots.get(Slot::MetricType),
        }
    }

    fn format_or_default(&self) -> &str {
        self.format.as_deref().unwrap_or(DEFAULT_FORMAT)
    }

    /// Request body: report type, format, resolved dates (both or neither), metrics.
    fn body(&self, ctx: &ActionContext, report_type: &str) -> Value {
        let mut body = Map::new();
        body.insert("report_type".to_string(), Value::from(report_type));
        body.insert("format".to_string(), Value::from(self.format_or_default()));
        if let Some(range) = ctx.dates().resolve(self.date_range.as_deref()) {
            debug!(phrase = ?self.date_range, range = %range, "report period resolved");
            body.insert("start_date".to_string(), Value::from(range.start_iso()));
            body.insert("end_date".to_string(), Value::from(range.end_iso()));
        }
        put_present(&mut body, "metrics", self.metric_type.as_ref());
        Value::Object(body)
    }

    /// "Format / Time period / Metrics" lines appended after the download link.
    fn details(&self, format: Option<&str>) -> String {
        let mut details = String::new();
        if let Some(format) = format {
            details.push_str(&format!("\nFormat: {}", format.to_uppercase()));
        }
        if let Some(period) = &self.date_range {
            details.push_str(&format!("\nTime period: {}", period));
        }
        if let Some(metrics) = &self.metric_type {
            details.push_str(&format!("\nMetrics included: {}", metrics));
        }
        details
    }
}

fn report_url(data: &Value) -> Option<String> {
    field_text(data, "report_url").filter(|url| !url.is_empty())
}

pub struct KpiReport {
    ctx: ActionContext,
}

impl KpiReport {
    pub fn new(ctx: ActionContext) -> Self {
        Self { ctx }
    }
}

#[async_trait::async_trait]
impl ActionHandler for KpiReport {
    fn name(&self) -> &'static str {
        "action_generate_kpi_report"
    }

    fn slots(&self) -> &'static [Slot] {
        &[Slot::DateRange, Slot::Format, Slot::MetricType]
    }

    async fn run(&self, slots: &Slots) -> OutgoingMessage {
        let report = ReportSlots::from_slots(slots);
        let request = BackendRequest::post(GENERATE_ENDPOINT, report.body(&self.ctx, "kpi"));

        match self.ctx.call(request, OK).await {
            Ok(data) => match report_url(&data) {
                Some(url) => OutgoingMessage::new(format!(
                    "Your KPI report has been generated! You can download it here: {}{}",
                    url,
                    // Only echo the format when the user picked one.
                    report.details(report.format.as_deref())
                )),
                None => OutgoingMessage::new(
                    "Your report has been generated and is available in the Reports section of the dashboard.",
                ),
            },
            Err(DomainError::UnexpectedStatus { status, .. }) => {
                warn!(status, "KPI report generation refused");
                OutgoingMessage::new(
                    "I couldn't generate the KPI report at this time. Please try again later or check the Reports section in the dashboard.",
                )
            }
            Err(e) => {
                error!(error = %e, "Error generating KPI report");
                OutgoingMessage::new(
                    "I encountered an error while generating your KPI report. Please try again later.",
                )
            }
        }
    }
}

pub struct CustomReport {
    ctx: ActionContext,
}

impl CustomReport {
    pub fn new(ctx: ActionContext) -> Self {
        Self { ctx }
    }
}

#[async_trait::async_trait]
impl ActionHandler for CustomReport {
    fn name(&self) -> &'static str {
        "action_customize_report"
    }

    fn slots(&self) -> &'static [Slot] {
        &[Slot::ReportType, Slot::DateRange, Slot::Format, Slot::MetricType]
    }

    async fn run(&self, slots: &Slots) -> OutgoingMessage {
        let report = ReportSlots::from_slots(slots);
        let report_type = slots
            .get(Slot::ReportType)
            .unwrap_or_else(|| DEFAULT_CUSTOM_REPORT_TYPE.to_string());
        let request =
            BackendRequest::post(CUSTOMIZE_ENDPOINT, report.body(&self.ctx, &report_type));

        match self.ctx.call(request, OK).await {
            Ok(data) => match report_url(&data) {
                Some(url) => OutgoingMessage::new(format!(
                    "Your custom report has been generated! You can download it here: {}{}",
                    url,
                    report.details(Some(report.format_or_default()))
                )),
                None => OutgoingMessage::new(
                    "Your custom report has been created and is available in the Reports section of the dashboard.",
                ),
            },
            Err(DomainError::UnexpectedStatus { status, .. }) => {
                warn!(status, report_type = %report_type, "custom report refused");
                OutgoingMessage::new(
                    "I couldn't customize the report at this time. Please try again later or use the Reports section in the dashboard to create a custom report.",
                )
            }
            Err(e) => {
                error!(error = %e, report_type = %report_type, "Error customizing report");
                OutgoingMessage::new(
                    "I encountered an error while customizing your report. Please try again later or use the Reports section to create one manually.",
                )
            }
        }
    }
}
