use clap::Args;
use job_alert::client::HttpConfigClient;
use job_alert::config::AppConfig;
use job_alert::error::AppError;
use job_alert::form::{ExperienceBounds, FormController, FormEvent, Outcome, SalaryRangeInput};
use job_alert::profiles::UserProfile;

#[derive(Args, Debug, Default)]
pub(crate) struct RemoteArgs {
    /// Base URL of the configuration API (defaults to CONFIG_API_URL)
    #[arg(long)]
    pub(crate) api_url: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct SubmitArgs {
    #[command(flatten)]
    pub(crate) remote: RemoteArgs,
    /// Receiver email; repeat for several receivers
    #[arg(long = "email")]
    pub(crate) emails: Vec<String>,
    /// Preferred location; repeat for several locations
    #[arg(long = "location")]
    pub(crate) locations: Vec<String>,
    /// Salary range in LPA as MIN-MAX; either side may be left blank (e.g. 7.5- or -10)
    #[arg(long = "salary", value_parser = parse_salary_range, allow_hyphen_values = true)]
    pub(crate) salaries: Vec<SalaryRangeInput>,
    /// Minimum years of experience
    #[arg(long)]
    pub(crate) experience_min: Option<f64>,
    /// Maximum years of experience
    #[arg(long)]
    pub(crate) experience_max: Option<f64>,
    /// Job title to search for
    #[arg(long)]
    pub(crate) job_title: Option<String>,
    /// Print the filled form and normalized payload without contacting the service
    #[arg(long)]
    pub(crate) dry_run: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ProfilesArgs {
    #[command(flatten)]
    pub(crate) remote: RemoteArgs,
    /// Show a single profile instead of the full listing
    #[arg(long)]
    pub(crate) email: Option<String>,
}

pub(crate) fn parse_salary_range(raw: &str) -> Result<SalaryRangeInput, String> {
    let (min, max) = raw
        .split_once('-')
        .ok_or_else(|| format!("failed to parse '{raw}' as MIN-MAX"))?;
    let bound = |value: &str| -> Result<Option<f64>, String> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }
        value
            .parse::<f64>()
            .map(Some)
            .map_err(|err| format!("failed to parse '{value}' in '{raw}' as a salary ({err})"))
    };
    Ok(SalaryRangeInput::new(bound(min)?, bound(max)?))
}

/// Edits that reproduce the command-line values in the form, row by row.
pub(crate) fn form_events(args: &SubmitArgs) -> Vec<FormEvent> {
    let mut events = Vec::new();

    for (index, value) in args.emails.iter().enumerate() {
        if index > 0 {
            events.push(FormEvent::AddEmail);
        }
        events.push(FormEvent::UpdateEmail {
            index,
            value: value.clone(),
        });
    }
    for (index, value) in args.locations.iter().enumerate() {
        if index > 0 {
            events.push(FormEvent::AddLocation);
        }
        events.push(FormEvent::UpdateLocation {
            index,
            value: value.clone(),
        });
    }
    for (index, range) in args.salaries.iter().enumerate() {
        if index > 0 {
            events.push(FormEvent::AddSalaryRange);
        }
        events.push(FormEvent::UpdateSalaryRange {
            index,
            range: *range,
        });
    }

    events.push(FormEvent::SetExperience(ExperienceBounds {
        min: args.experience_min,
        max: args.experience_max,
    }));
    if let Some(title) = &args.job_title {
        events.push(FormEvent::SetJobTitle(title.clone()));
    }
    events
}

fn remote_client(remote: &RemoteArgs) -> Result<(AppConfig, HttpConfigClient), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(url) = remote.api_url.as_deref() {
        config.client.override_base_url(url)?;
    }
    let client = HttpConfigClient::new(&config.client)?;
    Ok((config, client))
}

pub(crate) async fn run_submit(args: SubmitArgs) -> Result<(), AppError> {
    let (config, client) = remote_client(&args.remote)?;
    let controller = FormController::with_config(client, &config.form);
    for event in form_events(&args) {
        controller.dispatch(event);
    }

    if args.dry_run {
        println!("{}", controller.view());
        let payload = controller.state().prepare()?;
        let body = serde_json::to_string_pretty(&payload).map_err(std::io::Error::from)?;
        println!("\nPayload for POST {}/config:\n{body}", config.client.base_url);
        return Ok(());
    }

    let Some(outcome) = controller.submit().await else {
        return Ok(());
    };
    println!("{}", controller.view());

    match outcome {
        Outcome::Success { .. } => Ok(()),
        Outcome::Error(err) => Err(err.into()),
    }
}

pub(crate) async fn run_profiles(args: ProfilesArgs) -> Result<(), AppError> {
    let (_, client) = remote_client(&args.remote)?;

    match args.email.as_deref() {
        Some(email) => {
            let profile = client.fetch_profile(email).await?;
            println!("{}", render_profile(&profile));
        }
        None => {
            let profiles = client.list_profiles().await?;
            if profiles.is_empty() {
                println!("No active profiles.");
            }
            for profile in profiles {
                println!("{}", render_profile(&profile));
            }
        }
    }
    Ok(())
}

pub(crate) async fn run_health(args: RemoteArgs) -> Result<(), AppError> {
    let (_, client) = remote_client(&args)?;
    let health = client.health().await?;
    println!("{} ({}): {}", health.status, client.base_url(), health.message);
    Ok(())
}

fn render_profile(profile: &UserProfile) -> String {
    let salary = match (profile.expected_salary_min, profile.expected_salary_max) {
        (None, None) => "any".to_string(),
        (min, max) => format!(
            "{} - {}",
            min.map_or_else(|| "any".to_string(), |value| value.to_string()),
            max.map_or_else(|| "any".to_string(), |value| value.to_string())
        ),
    };
    let locations = if profile.preferred_locations.is_empty() {
        "any".to_string()
    } else {
        profile.preferred_locations.join(", ")
    };

    format!(
        "{} ({})\n  role: {}\n  locations: {}\n  salary (LPA): {}\n  experience: {}\n  skills: {}",
        profile.email,
        profile.name,
        profile.current_role.as_deref().unwrap_or("-"),
        locations,
        salary,
        profile
            .experience_years
            .map_or_else(|| "-".to_string(), |years| format!("{years}+ years")),
        if profile.primary_skills.is_empty() {
            "-".to_string()
        } else {
            profile.primary_skills.join(", ")
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use job_alert::form::{FormState, SalaryRange, OPEN_SALARY_MAX};

    #[test]
    fn salary_ranges_allow_open_bounds() {
        assert_eq!(
            parse_salary_range("7.5-"),
            Ok(SalaryRangeInput::new(Some(7.5), None))
        );
        assert_eq!(
            parse_salary_range(" - 10"),
            Ok(SalaryRangeInput::new(None, Some(10.0)))
        );
        assert_eq!(
            parse_salary_range("12-20"),
            Ok(SalaryRangeInput::new(Some(12.0), Some(20.0)))
        );
        assert!(parse_salary_range("12").is_err());
        assert!(parse_salary_range("a-b").is_err());
    }

    #[test]
    fn form_events_rebuild_the_command_line_form() {
        let args = SubmitArgs {
            emails: vec!["a@b.com".to_string(), "c@d.io".to_string()],
            locations: vec!["Pune".to_string()],
            salaries: vec![
                SalaryRangeInput::new(Some(5.0), None),
                SalaryRangeInput::new(None, Some(10.0)),
            ],
            experience_min: Some(1.5),
            job_title: Some("Backend Engineer".to_string()),
            ..SubmitArgs::default()
        };

        let state = form_events(&args)
            .into_iter()
            .fold(FormState::default(), FormState::reduce);
        assert_eq!(&*state.emails, &["a@b.com", "c@d.io"]);
        assert_eq!(&*state.locations, &["Pune"]);

        let payload = state.prepare().expect("payload builds");
        assert_eq!(
            payload.salary_ranges,
            vec![
                SalaryRange {
                    min: 5.0,
                    max: OPEN_SALARY_MAX
                },
                SalaryRange {
                    min: 0.0,
                    max: 10.0
                },
            ]
        );
        assert_eq!(payload.experience_min, Some(1.5));
        assert_eq!(payload.experience_max, None);
        assert_eq!(payload.job_title, "Backend Engineer");
    }

    #[test]
    fn empty_arguments_leave_blank_rows() {
        let state = form_events(&SubmitArgs::default())
            .into_iter()
            .fold(FormState::default(), FormState::reduce);
        assert_eq!(state, FormState::default());
    }

    #[test]
    fn renders_profile_summary() {
        let mut profile = UserProfile::new("dev@jobs.io", Utc::now());
        profile.expected_salary_min = Some(8.0);
        profile.experience_years = Some(3.5);

        let rendered = render_profile(&profile);
        assert!(rendered.starts_with("dev@jobs.io (dev)"));
        assert!(rendered.contains("salary (LPA): 8 - any"));
        assert!(rendered.contains("experience: 3.5+ years"));
        assert!(rendered.contains("locations: any"));
    }
}
