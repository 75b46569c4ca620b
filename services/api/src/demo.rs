use chrono::{Local, NaiveDate, Utc};
use clap::Args;
use holiday_hours::catalog::{find_preset, BusinessType, PRESET_HOLIDAYS, PRICE};
use holiday_hours::error::AppError;
use holiday_hours::listing::SiteLinks;
use holiday_hours::schedule::{HolidayRecord, HolidaySchedule, HolidayStatus};
use holiday_hours::wizard::{CreationWizard, StepState, WizardStep};
use serde::Deserialize;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Args, Debug)]
pub(crate) struct ScheduleArgs {
    /// JSON file holding either a list of holidays or a page with a `holidays` field
    #[arg(long)]
    pub(crate) file: PathBuf,
    /// Reference date for the upcoming filter (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Only list holidays on or after the reference date
    #[arg(long)]
    pub(crate) upcoming_only: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Business name used for the walkthrough
    #[arg(long)]
    pub(crate) business_name: Option<String>,
    /// Owner e-mail used for the walkthrough
    #[arg(long)]
    pub(crate) email: Option<String>,
    /// Reference date for the preview (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Base URL of the hosted site used for page and share links
    #[arg(long, default_value = "http://localhost:3000")]
    pub(crate) public_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScheduleFile {
    Holidays(Vec<HolidayRecord>),
    Page { holidays: Vec<HolidayRecord> },
}

impl ScheduleFile {
    fn into_schedule(self) -> HolidaySchedule {
        match self {
            ScheduleFile::Holidays(holidays) | ScheduleFile::Page { holidays } => {
                HolidaySchedule::new(holidays)
            }
        }
    }
}

pub(crate) fn run_schedule(args: ScheduleArgs) -> Result<(), AppError> {
    let ScheduleArgs {
        file,
        today,
        upcoming_only,
    } = args;

    let raw = fs::read_to_string(&file)?;
    let schedule = serde_json::from_str::<ScheduleFile>(&raw)?.into_schedule();
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    print!("{}", render_schedule(&schedule, today, upcoming_only));
    Ok(())
}

pub(crate) fn run_presets() {
    print!("{}", render_presets());
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        business_name,
        email,
        today,
        public_url,
    } = args;

    let links = SiteLinks::new(&public_url)?;
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let mut wizard = CreationWizard::new();

    println!("Holiday hours page walkthrough");

    wizard.business.name = business_name.unwrap_or_else(|| "Corner Bakery".to_string());
    wizard.business.email = email.unwrap_or_else(|| "owner@cornerbakery.test".to_string());
    wizard.business.business_type = BusinessType::Cafe.value().to_string();
    println!("{}", render_indicator(&wizard));
    wizard.advance()?;

    for name in [
        "Thanksgiving Day",
        "Christmas Eve",
        "Christmas Day",
        "New Year's Day",
    ] {
        if let Some(preset) = find_preset(name) {
            wizard.holidays.toggle_preset(preset);
        }
    }
    wizard.holidays.add_custom("Annual Stocktake", "2025-01-02")?;
    println!("{}", render_indicator(&wizard));
    wizard.advance()?;

    wizard
        .holidays
        .set_status("Christmas Eve", HolidayStatus::Special)?;
    wizard.holidays.set_close_time("Christmas Eve", "14:00")?;
    wizard
        .holidays
        .set_notes("Christmas Eve", "Pre-orders only after noon")?;
    wizard
        .holidays
        .set_status("Annual Stocktake", HolidayStatus::Special)?;
    wizard.holidays.set_open_time("Annual Stocktake", "12:00")?;
    println!("{}", render_indicator(&wizard));
    wizard.advance()?;

    println!("{}", render_indicator(&wizard));
    let submission = wizard.submission()?;
    let business = submission.business.into_business(Uuid::new_v4(), Utc::now())?;

    let page_url = links.public_page(business.id);
    println!("\nPreview for {}", business.name);
    print!("{}", render_schedule(&wizard.holidays, today, false));
    println!("\nTotal due: {} {}", PRICE.display(), PRICE.currency);
    println!("Public page: {page_url}");
    println!("Dashboard link: {}", links.dashboard(business.id, "<magic-link-token>"));
    println!("Share on Facebook: {}", links.facebook_share(&page_url)?);
    println!(
        "Share on Twitter: {}",
        links.twitter_share(&page_url, &business.name)?
    );

    Ok(())
}

pub(crate) fn render_schedule(
    schedule: &HolidaySchedule,
    today: NaiveDate,
    upcoming_only: bool,
) -> String {
    let mut out = String::new();
    let summary = schedule.summary(today);

    let _ = writeln!(out, "Holiday hours (evaluated {today})");
    let _ = writeln!(
        out,
        "{} holidays: {} closed, {} special hours, {} normal hours, {} upcoming",
        summary.total,
        summary.closed,
        summary.special_hours,
        summary.normal_hours,
        summary.upcoming
    );

    let views: Vec<_> = schedule
        .views(today)
        .into_iter()
        .filter(|view| view.upcoming || !upcoming_only)
        .collect();

    if views.is_empty() {
        let _ = writeln!(out, "\nNo holidays configured yet.");
        return out;
    }

    let _ = writeln!(out);
    for view in &views {
        let _ = writeln!(
            out,
            "{} {} | {} | {}",
            view.display.symbol, view.name, view.formatted_date, view.display.text
        );
        if let Some(notes) = &view.notes {
            let _ = writeln!(out, "    {notes}");
        }
    }

    if let Some(next) = &summary.next_holiday {
        let _ = writeln!(
            out,
            "\nNext up: {} on {} ({} days away)",
            next.name, next.formatted_date, next.days_away
        );
    }

    out
}

pub(crate) fn render_presets() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Preset holidays");
    for preset in &PRESET_HOLIDAYS {
        let _ = writeln!(out, "- {} ({})", preset.name, preset.date);
    }
    out
}

fn render_indicator(wizard: &CreationWizard) -> String {
    let steps: Vec<String> = wizard
        .indicator()
        .into_iter()
        .map(|(step, state)| {
            let marker = match state {
                StepState::Complete => "✓".to_string(),
                StepState::Current => format!("[{}]", step.number()),
                StepState::Upcoming => step.number().to_string(),
            };
            format!("{marker} {}", step.title())
        })
        .collect();

    let current: WizardStep = wizard.step();
    format!("\nStep {}: {}\n  {}", current.number(), current.title(), steps.join(" -> "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, 28).expect("valid date")
    }

    #[test]
    fn renders_sorted_schedule_with_badges() {
        let schedule = HolidaySchedule::new(vec![
            HolidayRecord::new("New Year", "2025-01-01", HolidayStatus::Normal),
            HolidayRecord::closed("Christmas", "2024-12-25").with_notes("See you on the 26th"),
        ]);

        let output = render_schedule(&schedule, today(), false);

        let christmas = output.find("🔒 Christmas").expect("christmas listed");
        let new_year = output.find("✓ New Year").expect("new year listed");
        assert!(christmas < new_year);
        assert!(output.contains("Wednesday, December 25, 2024 | Closed"));
        assert!(output.contains("    See you on the 26th"));
        assert!(output.contains("Next up: Christmas"));
    }

    #[test]
    fn upcoming_only_hides_past_holidays() {
        let schedule = HolidaySchedule::new(vec![
            HolidayRecord::closed("Halloween", "2024-10-31"),
            HolidayRecord::special("Thanksgiving", "2024-11-28", "08:00", "12:00"),
        ]);

        let output = render_schedule(&schedule, today(), true);

        assert!(!output.contains("Halloween"));
        assert!(output.contains("⏰ Thanksgiving | Thursday, November 28, 2024 | 8:00 AM - 12:00 PM"));
    }

    #[test]
    fn empty_schedule_says_so() {
        let output = render_schedule(&HolidaySchedule::default(), today(), false);
        assert!(output.contains("No holidays configured yet."));
    }

    #[test]
    fn schedule_file_accepts_list_or_page() {
        let list: ScheduleFile =
            serde_json::from_str(r#"[{"name":"Labor Day","date":"2025-09-01","status":"closed"}]"#)
                .expect("list parses");
        assert_eq!(list.into_schedule().len(), 1);

        let page: ScheduleFile = serde_json::from_str(
            r#"{"id":"x","holidays":[{"name":"Labor Day","date":"2025-09-01","status":"normal"}]}"#,
        )
        .expect("page parses");
        assert_eq!(page.into_schedule().len(), 1);
    }

    #[test]
    fn presets_listing_includes_every_preset() {
        let output = render_presets();
        assert_eq!(output.lines().count(), PRESET_HOLIDAYS.len() + 1);
        assert!(output.contains("- Independence Day (2025-07-04)"));
    }

    #[test]
    fn demo_runs_end_to_end() {
        let args = DemoArgs {
            today: Some(today()),
            public_url: "http://localhost:3000".to_string(),
            ..DemoArgs::default()
        };
        run_demo(args).expect("demo completes");
    }
}
