use crate::infra::{ConsoleNotifier, InMemoryApplicantRepository};
use chrono::Local;
use clap::Args;
use std::sync::Arc;
use uptick_admissions::error::AppError;
use uptick_admissions::workflows::applicants::ApplicantIntakeService;
use uptick_admissions::workflows::apply::tracks::catalogue;
use uptick_admissions::workflows::apply::{
    resolve, ApplicationRecord, ApplicationReview, ApplicationWizard, FieldErrors, Track,
    TrackToolSet, WizardError,
};
use uptick_admissions::workflows::dashboard::CourseProgress;

const DEMO_COURSE_WEEKS: u32 = 12;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    #[arg(long, default_value = "Jane")]
    pub(crate) first_name: String,
    #[arg(long, default_value = "Doe")]
    pub(crate) last_name: String,
    #[arg(long, default_value = "jane@x.com")]
    pub(crate) email: String,
    #[arg(long, default_value = "+1234567890")]
    pub(crate) phone: String,
    #[arg(long, default_value = "NYC")]
    pub(crate) city: String,
    /// Track code, e.g. BACKEND or MOBILE_DEVELOPMENT
    #[arg(long, default_value = "BACKEND", value_parser = parse_track)]
    pub(crate) track: Track,
    /// Comma separated tools; defaults to the first option offered for the track
    #[arg(long, value_delimiter = ',')]
    pub(crate) tools: Vec<String>,
    /// Free-text tools not in the list
    #[arg(long, default_value = "")]
    pub(crate) other_tools: String,
    #[arg(long, default_value = "TWITTER")]
    pub(crate) referral: String,
    /// Required when --referral is OTHER
    #[arg(long, default_value = "")]
    pub(crate) referral_other: String,
    /// Leave the final confirmation unticked to see the submission blocked
    #[arg(long)]
    pub(crate) skip_confirm: bool,
    /// Weeks completed for the dashboard progress preview
    #[arg(long, default_value_t = 0)]
    pub(crate) weeks_completed: u32,
}

#[derive(Args, Debug, Default)]
pub(crate) struct TracksArgs {
    /// Only show one track
    #[arg(long, value_parser = parse_track)]
    pub(crate) track: Option<Track>,
    /// Emit JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

fn parse_track(raw: &str) -> Result<Track, String> {
    let track: Track = raw.parse().map_err(|err| format!("{err}"))?;
    if track.is_set() {
        Ok(track)
    } else {
        Err("track must not be empty".to_string())
    }
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("Uptick admissions demo");

    let mut wizard = ApplicationWizard::new();
    fill_record(wizard.record_mut(), &args);

    while !wizard.navigator().is_last_step() {
        if let Some(descriptor) = wizard.descriptor() {
            println!(
                "\nStep {} of {}: {}",
                wizard.current_step(),
                wizard.navigator().total_steps(),
                descriptor.title
            );
        }
        match wizard.advance() {
            Ok(outcome) => {
                print_messages("warning", &outcome.warnings);
                println!("  ok");
            }
            Err(outcome) => {
                print_messages("error", &outcome.errors);
                println!("\nWizard stopped on step {}.", wizard.current_step());
                return Ok(());
            }
        }
    }

    println!("\nReview");
    let review = ApplicationReview::from_record(wizard.record());
    for item in review.items() {
        println!("  {:<16} {}", item.label, item.value);
    }

    wizard.record_mut().confirm = !args.skip_confirm;
    let payload = match wizard.submit() {
        Ok(payload) => payload,
        Err(WizardError::Validation(outcome)) => {
            print_messages("error", &outcome.errors);
            println!("\nSubmission blocked until the application is confirmed.");
            return Ok(());
        }
        Err(err) => {
            println!("\nSubmission failed: {err}");
            return Ok(());
        }
    };

    match serde_json::to_string_pretty(&payload) {
        Ok(json) => println!("\nSubmission payload:\n{json}"),
        Err(err) => println!("\nSubmission payload unavailable: {err}"),
    }

    let repository = Arc::new(InMemoryApplicantRepository::default());
    let notifier = Arc::new(ConsoleNotifier);
    let service = ApplicantIntakeService::new(repository, notifier);
    let receipt = service
        .submit_on(payload, Local::now().date_naive())
        .await?;

    println!(
        "\nStored applicant {} ({}) with status {}",
        receipt.applicant.id,
        receipt.applicant.course,
        receipt.applicant.status.label()
    );
    println!(
        "Confirmation email {}",
        if receipt.notification_sent {
            "queued"
        } else {
            "not sent"
        }
    );

    match CourseProgress::new(args.weeks_completed, DEMO_COURSE_WEEKS) {
        Ok(progress) => println!(
            "Course progress preview: week {} of {} ({}%)",
            progress.current_week(),
            progress.total_weeks(),
            progress.percentage()
        ),
        Err(err) => println!("Course progress unavailable: {err}"),
    }

    Ok(())
}

pub(crate) fn run_tracks(args: TracksArgs) -> Result<(), AppError> {
    let sets: Vec<TrackToolSet> = match args.track {
        Some(track) => vec![resolve(track)],
        None => catalogue().to_vec(),
    };

    if args.json {
        match serde_json::to_string_pretty(&sets) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Track catalogue unavailable: {err}"),
        }
        return Ok(());
    }

    for set in sets {
        println!("{} ({})", set.track.display_name(), set.track.code());
        for option in set.options {
            println!("  - {option}");
        }
    }
    Ok(())
}

fn fill_record(record: &mut ApplicationRecord, args: &DemoArgs) {
    record.first_name = args.first_name.clone();
    record.last_name = args.last_name.clone();
    record.email = args.email.clone();
    record.phone_number = args.phone.clone();
    record.city = args.city.clone();
    record.track = args.track;
    record.referral_source = args.referral.clone();
    record.referral_source_other = args.referral_other.clone();

    let offered = resolve(args.track);
    let tools = if args.tools.is_empty() {
        offered
            .options
            .first()
            .map(|option| vec![option.to_string()])
            .unwrap_or_default()
    } else {
        args.tools.clone()
    };

    if let Some(selection) = record.tools_for_mut(args.track) {
        *selection.selected = tools;
        *selection.other = args.other_tools.clone();
    }
}

fn print_messages(kind: &str, messages: &FieldErrors) {
    for (field, message) in messages {
        println!("  {kind} [{field}]: {message}");
    }
}
