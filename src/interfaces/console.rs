//! Terminal presentation: notices, redirects and the dashboard view.

use crate::application::dashboard::{DashboardData, ExportReceipt};
use crate::application::registration::RegistrationOutcome;
use crate::domain::payment::PaymentOutcome;
use crate::domain::ports::{Navigator, Notice, NoticeLevel, Notifier};
use crate::domain::registration::Registration;
use crate::domain::session::Route;
use crate::domain::stats::RegistrationStats;
use std::fmt::Write;

/// Prints notices to stderr, one per line.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

pub fn format_notice(notice: &Notice) -> String {
    let tag = match notice.level {
        NoticeLevel::Success => "ok",
        NoticeLevel::Warning => "warning",
        NoticeLevel::Error => "error",
    };
    format!("[{tag}] {}", notice.message)
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        eprintln!("{}", format_notice(&notice));
    }
}

/// Translates redirects into the command that opens that view.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNavigator;

pub fn route_hint(route: Route) -> String {
    let command = match route {
        Route::AdminLogin => "neuron admin login",
        Route::AdminDashboard => "neuron admin dashboard",
    };
    format!("-> {route} (run `{command}`)")
}

impl Navigator for ConsoleNavigator {
    fn navigate(&self, route: Route) {
        eprintln!("{}", route_hint(route));
    }
}

pub fn render_outcome(outcome: &RegistrationOutcome) -> String {
    let id = &outcome.registration_id;
    match outcome.payment {
        PaymentOutcome::Completed => {
            format!("Registration complete!\nYour registration ID: {id}\n")
        }
        PaymentOutcome::Dismissed | PaymentOutcome::Unavailable => {
            format!("Registration {id} is saved but payment is still pending.\n")
        }
        PaymentOutcome::VerificationFailed => format!(
            "Payment for registration {id} could not be confirmed. Contact support with this ID.\n"
        ),
    }
}

pub fn render_stats(stats: &RegistrationStats) -> String {
    let rows = [
        ("Total Registrations", stats.total_registrations.to_string()),
        ("Paid", stats.paid_registrations.to_string()),
        ("Pending", stats.pending_registrations.to_string()),
        ("Total Revenue (INR)", stats.total_revenue_inr.to_string()),
    ];
    let mut out = String::new();
    for (label, value) in rows {
        let _ = writeln!(out, "{label:<21}{value}");
    }
    out
}

const REGISTRATION_COLUMNS: [&str; 9] = [
    "Registration ID",
    "Name",
    "Email",
    "Phone",
    "College",
    "Team",
    "Status",
    "Transaction ID",
    "Created At",
];

fn registration_cells(reg: &Registration) -> [String; 9] {
    [
        reg.registration_id.to_string(),
        reg.full_name.clone(),
        reg.email.clone(),
        reg.phone.clone(),
        reg.college.clone(),
        reg.team_name.clone().unwrap_or_else(|| "-".to_string()),
        reg.payment_status.to_string(),
        reg.transaction_id.clone().unwrap_or_else(|| "-".to_string()),
        reg.created_at.format("%Y-%m-%d %H:%M").to_string(),
    ]
}

fn table_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let line = cells
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    line.trim_end().to_string()
}

/// Plain-text table, one line per registration, in the order given.
pub fn render_registrations(registrations: &[Registration]) -> String {
    if registrations.is_empty() {
        return "No registrations yet.\n".to_string();
    }

    let rows: Vec<[String; 9]> = registrations.iter().map(registration_cells).collect();
    let mut widths = REGISTRATION_COLUMNS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", table_line(REGISTRATION_COLUMNS.into_iter(), &widths));
    for row in &rows {
        let _ = writeln!(out, "{}", table_line(row.iter().map(String::as_str), &widths));
    }
    out
}

pub fn render_dashboard(data: &DashboardData) -> String {
    format!(
        "{}\n{}",
        render_stats(&data.stats),
        render_registrations(&data.registrations)
    )
}

pub fn render_export(receipt: &ExportReceipt) -> String {
    match receipt.rows {
        Some(rows) => format!("{} ({rows} registrations)\n", receipt.path.display()),
        None => format!("{}\n", receipt.path.display()),
    }
}
