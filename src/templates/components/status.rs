// src/templates/components/status.rs
use crate::status::{color_classes_of, label_of, ColorName, ReportedStatus};
use maud::{html, Markup};

pub const UNKNOWN_STATUS_LABEL: &str = "Неизвестный статус";

/// Colored badge for an application status. Codes outside the contract get
/// a neutral badge so the table still renders.
pub fn status_badge(status: &ReportedStatus) -> Markup {
    match (label_of(status), status.known()) {
        (Ok(label), Some(known)) => html! {
            span class={ "badge " (color_classes_of(known).joined()) } data-status=(known.code()) {
                (label)
            }
        },
        (result, _) => {
            if let Err(err) = result {
                tracing::warn!(error = %err, "rendering placeholder for unknown status");
            }
            html! {
                span
                    class={ "badge " (ColorName::Gray.classes().joined()) }
                    data-status=(status.raw())
                    title=(status.raw())
                {
                    (UNKNOWN_STATUS_LABEL)
                }
            }
        }
    }
}
