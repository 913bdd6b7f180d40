use std::path::PathBuf;

use clap::{Parser, Subcommand};

use jobboard_analytics::metrics::{self, FunnelStep, GrowthMetric, JobPerformance, TimeSeriesPoint};
use jobboard_analytics::{
    Analytics, AnalyticsConfig, ExportFormat, JobMatch, Period, ReportType, Snapshot,
};

#[derive(Parser)]
#[command(name = "jobboard-analytics", about = "Job board analytics and reporting")]
struct Cli {
    /// Config file (default: ~/.jobboard-analytics/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// JSON snapshot of users, companies, jobs and applications
    #[arg(long)]
    snapshot: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a role-specific dashboard
    Dashboard {
        #[command(subcommand)]
        target: DashboardTarget,
        /// Reference date (YYYY-MM-DD, default: today in UTC)
        #[arg(long, global = true)]
        today: Option<String>,
        /// Output as JSON
        #[arg(long, global = true)]
        json: bool,
    },
    /// Export a report as CSV or JSON
    Export {
        /// Report type: applications, jobs, companies, users
        report_type: String,
        /// Output format: csv, json
        #[arg(long, default_value = "csv")]
        format: String,
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Recommend open jobs for a candidate
    Match {
        user_id: String,
        #[arg(long)]
        json: bool,
    },
    /// Score job postings
    Performance {
        /// Only jobs of companies owned by this user
        #[arg(long)]
        owner: Option<String>,
        #[arg(long)]
        today: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Daily activity counts over a period
    Trend {
        #[command(subcommand)]
        target: TrendTarget,
        /// Period (e.g. 30d, mtd, 2025-01, 2025-01-01..2025-01-31)
        #[arg(long, default_value = "30d", global = true)]
        period: String,
        #[arg(long, global = true)]
        today: Option<String>,
    },
}

#[derive(Subcommand)]
enum DashboardTarget {
    /// Platform-wide landing page figures
    General,
    /// Administrator overview
    Admin,
    /// A job seeker's own dashboard
    Seeker { user_id: String },
    /// An employer's dashboard across the companies they own
    Employer { user_id: String },
}

#[derive(Subcommand)]
enum TrendTarget {
    /// User signups
    Users,
    /// Job postings
    Jobs,
    /// Applications received
    Applications,
}

fn parse_today(today: Option<&str>) -> anyhow::Result<chrono::NaiveDate> {
    match today {
        Some(s) => chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| anyhow::anyhow!("Invalid date '{s}' (expected YYYY-MM-DD): {e}")),
        None => Ok(chrono::Utc::now().date_naive()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = AnalyticsConfig::load(cli.config.as_deref())?;
    let analytics = Analytics::new(config);
    let snapshot = Snapshot::load(&cli.snapshot)?;

    match cli.command {
        Commands::Dashboard { target, today, json } => {
            let today = parse_today(today.as_deref())?;
            handle_dashboard(&analytics, &snapshot, target, today, json).await?;
        }
        Commands::Export {
            report_type,
            format,
            output,
        } => {
            let report_type = ReportType::parse(&report_type)?;
            let format = ExportFormat::parse(&format)?;
            let records = snapshot.report_records(report_type);
            let generated_on = chrono::Utc::now().date_naive();
            let file = analytics.export(&records, report_type, format, generated_on)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &file.content)?;
                    eprintln!("Wrote {} ({}) to {}", file.filename, file.mime_type, path.display());
                }
                None => println!("{}", file.content),
            }
        }
        Commands::Match { user_id, json } => {
            let profile = snapshot.candidate_profile(&user_id)?;
            let matches = analytics.match_jobs(&profile, &snapshot.job_listings());
            if json {
                println!("{}", serde_json::to_string_pretty(&matches)?);
            } else {
                println!("Matches for {user_id} ({} jobs)", matches.len());
                print_matches(&matches);
            }
        }
        Commands::Performance { owner, today, json } => {
            let today = parse_today(today.as_deref())?;
            let records = snapshot.performance_records(owner.as_deref(), today)?;
            let ranked = analytics.job_performance(&records);
            if json {
                println!("{}", serde_json::to_string_pretty(&ranked)?);
            } else {
                println!("Job Performance ({} jobs)", ranked.len());
                print_performance(&ranked);
            }
        }
        Commands::Trend {
            target,
            period,
            today,
        } => {
            let today = parse_today(today.as_deref())?;
            let period = Period::parse(&period, today)?;
            let inputs = snapshot.admin_inputs();
            let (label, points) = match target {
                TrendTarget::Users => (
                    "Signups",
                    metrics::trend_for(&period, &inputs.users, |u| u.created_at),
                ),
                TrendTarget::Jobs => (
                    "Job postings",
                    metrics::trend_for(&period, &inputs.jobs, |j| j.posted_at),
                ),
                TrendTarget::Applications => (
                    "Applications",
                    metrics::trend_for(&period, &inputs.applications, |a| a.applied_at),
                ),
            };
            println!("{label}: {period} ({} days)", period.num_days());
            print_trend(&points);
        }
    }

    Ok(())
}

async fn handle_dashboard(
    analytics: &Analytics,
    snapshot: &Snapshot,
    target: DashboardTarget,
    today: chrono::NaiveDate,
    json: bool,
) -> anyhow::Result<()> {
    match target {
        DashboardTarget::General => {
            let stats = analytics.general_dashboard_from(snapshot, today).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
                return Ok(());
            }
            println!("Platform Overview ({today})");
            println!("  Jobs:         {} ({} active)", stats.total_jobs, stats.active_jobs);
            println!("  Companies:    {}", stats.total_companies);
            println!("  Candidates:   {}", stats.total_candidates);
            println!("  Applications: {}", stats.total_applications);
            print_growth("Job growth", &stats.job_growth);
            print_growth("User growth", &stats.user_growth);
        }
        DashboardTarget::Admin => {
            let stats = analytics.admin_dashboard_from(snapshot, today).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
                return Ok(());
            }
            println!("Admin Dashboard ({today})");
            println!(
                "  Users:        {} ({} candidates, {} employers, {} admins)",
                stats.total_users,
                stats.users_by_role.candidates,
                stats.users_by_role.employers,
                stats.users_by_role.admins
            );
            println!(
                "  Companies:    {} ({} verified, {}%)",
                stats.total_companies, stats.verified_companies, stats.verification_rate
            );
            println!(
                "  Jobs:         {} ({} active, {} filled, {}% fill rate)",
                stats.total_jobs, stats.active_jobs, stats.filled_jobs, stats.fill_rate
            );
            println!("  Applications: {}", stats.total_applications);
            println!("  Uptime:       {:.1}%", stats.platform_uptime_percent);
            print_growth("User growth", &stats.user_growth);
            print_growth("Company growth", &stats.company_growth);
            print_growth("Job growth", &stats.job_growth);
            print_growth("Application growth", &stats.application_growth);
            print_funnel(&stats.application_funnel);
        }
        DashboardTarget::Seeker { user_id } => {
            let inputs = snapshot.job_seeker_inputs(&user_id)?;
            let stats = analytics.job_seeker_dashboard(&inputs, today);
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
                return Ok(());
            }
            println!("Job Seeker Dashboard: {user_id} ({today})");
            println!("  Applications:  {}", stats.total_applications);
            println!(
                "    pending {} / reviewing {} / interviewing {} / accepted {} / rejected {}",
                stats.status.pending,
                stats.status.reviewing,
                stats.status.interviewing,
                stats.status.accepted,
                stats.status.rejected
            );
            println!("  Success rate:  {}%", stats.success_rate);
            println!("  Response rate: {}%", stats.response_rate);
            println!("  Profile views: {}", stats.profile_views);
            println!("  Saved jobs:    {}", stats.saved_jobs);
            println!("  Recommended:");
            print_matches(&stats.recommended_jobs);
        }
        DashboardTarget::Employer { user_id } => {
            let inputs = snapshot.employer_inputs(&user_id, today)?;
            let stats = analytics.employer_dashboard(&inputs, today);
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
                return Ok(());
            }
            println!("Employer Dashboard: {user_id} ({today})");
            println!("  Jobs:            {} ({} active)", stats.total_jobs, stats.active_jobs);
            println!("  Views:           {}", stats.total_views);
            println!(
                "  Applications:    {} ({} in the last {} days)",
                stats.total_applications,
                stats.new_applications,
                analytics.config().recent_days
            );
            println!("  Hire rate:       {}%", stats.hire_rate);
            println!("  Avg conversion:  {}%", stats.avg_conversion_rate);
            print_funnel(&stats.application_funnel);
            println!("  Top performing:");
            print_performance(&stats.top_performing);
            println!("  Underperforming:");
            print_performance(&stats.underperforming);
        }
    }
    Ok(())
}

fn print_growth(label: &str, g: &GrowthMetric) {
    println!(
        "  {label}: {} this month vs {} last month ({:+}%)",
        g.current, g.previous, g.rate_percent
    );
}

fn print_funnel(steps: &[FunnelStep]) {
    println!("  Funnel:");
    for step in steps {
        println!(
            "    {:<13} {:>6}  {:>3}% of total  {:>3}% from previous",
            step.name, step.count, step.percentage_of_total, step.conversion_rate
        );
    }
}

fn print_matches(matches: &[JobMatch]) {
    if matches.is_empty() {
        println!("    No matching jobs");
        return;
    }
    for m in matches {
        println!("    [{:>3}] {} ({})", m.overall_score, m.title, m.job_id);
        if !m.matched_skills.is_empty() {
            println!("          skills: {}", m.matched_skills.join(", "));
        }
    }
}

fn print_performance(jobs: &[JobPerformance]) {
    if jobs.is_empty() {
        println!("    No jobs");
        return;
    }
    for j in jobs {
        println!(
            "    [{:>3}] {} ({}): {} views, {} applications, {}% conversion, {:.1}/day",
            j.quality_score,
            j.title,
            j.job_id,
            j.views,
            j.applications,
            j.conversion_rate,
            j.avg_applications_per_day
        );
    }
}

fn print_trend(points: &[TimeSeriesPoint]) {
    for p in points {
        println!("  {}  {:>5}", p.date, p.count);
    }
    println!("  Total: {}", metrics::trend::total(points));
}
