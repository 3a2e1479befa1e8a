// src/status/registry.rs
use super::{ApplicationStatus, ReportedStatus, StatusError};

/// Symbolic palette key; the CSS classes are derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorName {
    Gray,
    Amber,
    Blue,
    Indigo,
    Violet,
    Green,
    Emerald,
    Red,
    Purple,
}

impl ColorName {
    pub const fn key(self) -> &'static str {
        match self {
            ColorName::Gray => "gray",
            ColorName::Amber => "amber",
            ColorName::Blue => "blue",
            ColorName::Indigo => "indigo",
            ColorName::Violet => "violet",
            ColorName::Green => "green",
            ColorName::Emerald => "emerald",
            ColorName::Red => "red",
            ColorName::Purple => "purple",
        }
    }

    pub fn classes(self) -> ColorClasses {
        let key = self.key();
        ColorClasses {
            background: format!("bg-{key}-100"),
            text: format!("text-{key}-800"),
            border: format!("border-{key}-200"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorClasses {
    pub background: String,
    pub text: String,
    pub border: String,
}

impl ColorClasses {
    /// All three classes joined for a `class` attribute.
    pub fn joined(&self) -> String {
        format!("{} {} {}", self.background, self.text, self.border)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusDisplay {
    pub label: &'static str,
    pub color: ColorName,
    pub order: u8,
}

impl ApplicationStatus {
    /// Display metadata. The match is exhaustive, so a status added to the
    /// enum without an entry here does not compile.
    pub const fn display(self) -> StatusDisplay {
        use ApplicationStatus::*;
        use ColorName::*;

        let (label, color, order) = match self {
            Created => ("Создана", Gray, 0),
            InProgress => ("В процессе", Amber, 1),
            StatementUploaded => ("Выписка загружена", Blue, 2),
            StatementSentToBank => ("Выписка отправлена в банк", Indigo, 3),
            StatementVerifiedOk => ("Выписка проверена", Emerald, 4),
            StatementVerifiedFail => ("Выписка не прошла проверку", Red, 4),
            AgreementOtpSent => ("Ожидает подписания (OTP)", Violet, 5),
            AgreementSigned => ("Договор подписан", Purple, 6),
            ApplicationSentToBank => ("Заявка отправлена в банк", Indigo, 7),
            BankApproved => ("Одобрено банком", Green, 8),
            BankRejected => ("Отклонено банком", Red, 8),
            BankOtherResponse => ("Иной ответ банка", Amber, 8),
        };

        StatusDisplay {
            label,
            color,
            order,
        }
    }

    pub const fn label(self) -> &'static str {
        self.display().label
    }
}

/// Label for a status as received from the backend. Unknown codes are an
/// error; the raw code is never used as a label.
pub fn label_of(status: &ReportedStatus) -> Result<&'static str, StatusError> {
    match status {
        ReportedStatus::Known(status) => Ok(status.label()),
        ReportedStatus::Unknown(raw) => Err(StatusError::Unknown(raw.clone())),
    }
}

pub fn color_classes_of(status: ApplicationStatus) -> ColorClasses {
    status.display().color.classes()
}

pub fn order_of(status: ApplicationStatus) -> u8 {
    status.display().order
}

/// Stable sort by lifecycle order; equal orders keep their input positions.
pub fn sort_by_order(statuses: &mut [ApplicationStatus]) {
    statuses.sort_by_key(|status| order_of(*status));
}
