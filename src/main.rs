use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use emp_scrub::apis::dummyjson::DummyJsonUsers;
use emp_scrub::config::Config;
use emp_scrub::constants::{CLEAN_OUTPUT_FILE, SUMMARY_OUTPUT_FILE};
use emp_scrub::csv_io;
use emp_scrub::logging;
use emp_scrub::pipeline::enrich::{self, EnrichmentSource};
use emp_scrub::pipeline::{self, coerce, BusinessRules};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::error;

#[derive(Parser)]
#[command(name = "emp_scrub", about = "Employee roster cleaning pipeline", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean a roster file and write the output tables
    Run {
        /// Input CSV file
        #[arg(long)]
        input: PathBuf,
        /// Directory the output tables are written into
        #[arg(long, default_value = "output")]
        output_dir: PathBuf,
        /// Override the minimum salary rule
        #[arg(long)]
        min_salary: Option<f64>,
        /// Comma-separated list of departments to accept
        #[arg(long)]
        departments: Option<String>,
        /// Join age and city from the users directory endpoint
        #[arg(long)]
        enrich: bool,
        /// Optional TOML config file
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Inspect an input file without writing anything
    Check {
        /// Input CSV file
        #[arg(long)]
        input: PathBuf,
    },
}

fn build_rules(min_salary: Option<f64>, departments: Option<&str>) -> BusinessRules {
    let mut rules = BusinessRules::default();
    if let Some(min) = min_salary {
        rules.min_salary = min;
    }
    if let Some(list) = departments {
        rules.valid_departments = list
            .split(',')
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .collect();
    }
    rules
}

async fn run_command(
    input: PathBuf,
    output_dir: PathBuf,
    min_salary: Option<f64>,
    departments: Option<String>,
    enrich: bool,
    config_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = Config::load(config_path.as_deref())?;
    let rules = build_rules(min_salary, departments.as_deref());

    println!("🧹 Cleaning employee roster from {}", input.display());
    let rows = csv_io::read_employees(&input).context("reading the input table")?;
    println!("📄 Original rows: {}", rows.len());

    let output = pipeline::clean_employees(rows, &rules)?;

    fs::create_dir_all(&output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;
    let clean_path = output_dir.join(CLEAN_OUTPUT_FILE);
    let summary_path = output_dir.join(SUMMARY_OUTPUT_FILE);

    if enrich {
        let source = DummyJsonUsers::new(&config.enrichment)?;
        match source.fetch_users().await {
            Ok(records) => {
                let (enriched, matched) = enrich::left_join(output.employees.clone(), &records);
                csv_io::write_enriched_employees(&clean_path, &enriched)?;
                println!(
                    "🔗 Matched {} of {} employees against {}",
                    matched,
                    enriched.len(),
                    source.source_name()
                );
            }
            Err(e) => {
                error!(error = %e, "Enrichment failed; writing the un-enriched table");
                println!("⚠️  Enrichment failed ({e}); writing the un-enriched table");
                csv_io::write_clean_employees(&clean_path, &output.employees)?;
            }
        }
    } else {
        csv_io::write_clean_employees(&clean_path, &output.employees)?;
    }
    csv_io::write_department_summary(&summary_path, &output.summary)?;

    let report = &output.report;
    println!("\n📊 Run {} report:", output.run_id);
    println!("   Rows in:            {}", report.rows_in);
    println!("   Dropped (no key):   {}", report.dropped_missing_key);
    println!(
        "   Salaries imputed:   {} from department, {} from overall mean",
        report.salaries_from_department, report.salaries_from_global
    );
    println!("   Names filled:       {}", report.names_filled);
    println!("   Duplicates removed: {}", report.duplicates_removed);
    println!("   Filtered out:       {}", report.filtered_out);
    println!("   Rows out:           {}", report.rows_out);
    if report.unresolved_salaries > 0 {
        println!(
            "⚠️  {} salaries could not be imputed and did not pass the filter",
            report.unresolved_salaries
        );
    }

    println!("\n🏢 Department summary ({} groups):", output.summary.len());
    for group in &output.summary {
        println!(
            "   {}: {} employees, avg salary {:.2}",
            group.department, group.employee_count, group.avg_salary
        );
    }

    if !output.employees.is_empty() {
        println!("\n👤 Sample of cleaned rows:");
        for employee in output.employees.iter().take(5) {
            println!(
                "   #{} {} [{}] {:.2} {}",
                employee.emp_id,
                employee.name,
                employee.department,
                employee.salary,
                employee.salary_category
            );
        }
    }

    println!(
        "\n💾 Wrote {} and {}",
        clean_path.display(),
        summary_path.display()
    );
    println!("✅ Pipeline completed successfully");
    Ok(())
}

fn check_command(input: &Path) -> anyhow::Result<()> {
    let rows = csv_io::read_employees(input)?;
    println!("🔍 Checking {} ({} data rows)", input.display(), rows.len());

    let (records, stats) = coerce::coerce_rows(rows);
    let missing = |count: usize| -> String {
        format!("{} of {}", count, records.len())
    };
    let missing_ids = records.iter().filter(|r| r.emp_id.is_none()).count();
    let missing_names = records.iter().filter(|r| r.name.is_none()).count();
    let missing_departments = records.iter().filter(|r| r.department.is_none()).count();
    let missing_salaries = records.iter().filter(|r| r.salary.is_none()).count();
    let missing_keys = records
        .iter()
        .filter(|r| r.emp_id.is_none() || r.department.is_none())
        .count();
    let mut seen = HashSet::new();
    let duplicate_ids = records
        .iter()
        .filter_map(|r| r.emp_id)
        .filter(|id| !seen.insert(*id))
        .count();

    println!("   Missing emp_id:     {}", missing(missing_ids));
    println!("   Missing name:       {}", missing(missing_names));
    println!("   Missing department: {}", missing(missing_departments));
    println!("   Missing salary:     {}", missing(missing_salaries));
    println!("   Unparseable ids:    {}", stats.emp_id_failures);
    println!("   Unparseable salaries: {}", stats.salary_failures);
    println!("   Rows without a key: {} (would be dropped)", missing_keys);
    println!("   Duplicate ids:      {} (first kept)", duplicate_ids);
    println!("✅ Input looks processable");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            input,
            output_dir,
            min_salary,
            departments,
            enrich,
            config,
        } => run_command(input, output_dir, min_salary, departments, enrich, config).await,
        Commands::Check { input } => check_command(&input),
    }
}
