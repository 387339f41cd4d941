//! HostStats CLI Client
//!
//! Command-line interface for querying a HostStats server.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use hoststats_client::{Client, Result, ServerStatus, Table, PROFILE_ALL};

/// Detection log files carry no header row; this is the fixed column layout.
const DETECTION_LOG_HEADER: [&str; 9] = [
    "timeslot", "type", "protocol", "src_ip", "dst_ip", "src_port", "dst_port", "intensity",
    "note",
];

/// HostStats CLI
#[derive(Parser, Debug)]
#[command(name = "hoststats-cli")]
#[command(about = "CLI for the HostStats analytics server")]
#[command(version)]
struct Args {
    /// Server address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:3333", value_parser = parse_endpoint)]
    server: (String, u16),

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show server status
    Status,

    /// List available profiles
    Profiles,

    /// List the statistic fields of a profile
    Fields {
        /// Profile name
        #[arg(short, long, default_value = PROFILE_ALL)]
        profile: String,
    },

    /// Show per-host statistics for one timeslot
    TimeslotData {
        /// Timeslot name (yyyymmddhhii)
        timeslot: String,

        /// Profile name
        #[arg(short, long, default_value = PROFILE_ALL)]
        profile: String,

        /// Server-side filter expression
        #[arg(short, long)]
        filter: Option<String>,

        /// Maximum number of rows
        #[arg(short, long, default_value = "10")]
        limit: u32,

        /// Field to sort by
        #[arg(short, long)]
        sort: Option<String>,

        /// Sort ascending instead of descending
        #[arg(short, long)]
        ascending: bool,
    },

    /// Show statistics for one timeslot aggregated by address prefix
    IpMap {
        /// Timeslot name (yyyymmddhhii)
        timeslot: String,

        /// Profile name
        #[arg(short, long, default_value = PROFILE_ALL)]
        profile: String,

        /// Base address of the prefix to expand
        #[arg(short, long, default_value = "0.0.0.0")]
        base_address: String,

        /// Prefix length of the base address (0-16)
        #[arg(long, default_value = "0")]
        prefix_len: u8,
    },

    /// Show the per-timeslot history of one host
    HostHistory {
        /// Host IP address
        ip: String,

        /// First timeslot (yyyymmddhhii)
        from: String,

        /// Last timeslot (yyyymmddhhii)
        to: String,

        /// Profile name
        #[arg(short, long, default_value = PROFILE_ALL)]
        profile: String,
    },

    /// Show the host count per timeslot over a time window
    HostCount {
        /// First timeslot (yyyymmddhhii)
        from: String,

        /// Last timeslot (yyyymmddhhii)
        to: String,

        /// Profile name
        #[arg(short, long, default_value = PROFILE_ALL)]
        profile: String,
    },

    /// Show the flow count per timeslot over a time window
    FlowCount {
        /// First timeslot (yyyymmddhhii)
        from: String,

        /// Last timeslot (yyyymmddhhii)
        to: String,

        /// Profile name
        #[arg(short, long, default_value = PROFILE_ALL)]
        profile: String,
    },

    /// List the days with recorded detections
    DetectionLogList,

    /// Show the detection entries of one day
    DetectionLog {
        /// Date code (yyyymmdd)
        date: String,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,hoststats_client=info"));

    fmt().with_env_filter(filter).with_target(false).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let (host, port) = args.server;
    let client = Client::new(host, port);

    match args.command {
        Commands::Status => {
            let values = client.get_status()?;
            let status = ServerStatus::from_values(&values)?;
            println!("processing: {}", if status.processing { "yes" } else { "no" });
            println!("timeslot:   {}", status.timeslot.as_deref().unwrap_or("-"));
            println!("flows:      {}", status.flows);
            println!("hosts:      {}", status.hosts);
        }

        Commands::Profiles => {
            for profile in client.get_profiles()? {
                println!("{profile}");
            }
        }

        Commands::Fields { profile } => {
            for field in client.get_field_list(&profile)? {
                println!("{field}");
            }
        }

        Commands::TimeslotData {
            timeslot,
            profile,
            filter,
            limit,
            sort,
            ascending,
        } => {
            let table = client.get_timeslot_data(
                &profile,
                &timeslot,
                filter.as_deref(),
                limit,
                sort.as_deref(),
                ascending,
            )?;
            print_table(&table);
        }

        Commands::IpMap {
            timeslot,
            profile,
            base_address,
            prefix_len,
        } => {
            let table =
                client.get_timeslot_ip_map(&profile, &timeslot, &base_address, prefix_len)?;
            print_table(&table);
        }

        Commands::HostHistory {
            ip,
            from,
            to,
            profile,
        } => {
            let table = client.get_host_history(&profile, &ip, &from, &to)?;
            print_table(&table);
        }

        Commands::HostCount { from, to, profile } => {
            match client.get_host_cnt_history(&profile, &from, &to)? {
                Some(values) => print_values(values.iter()),
                None => println!("no data"),
            }
        }

        Commands::FlowCount { from, to, profile } => {
            match client.get_flow_cnt_history(&profile, &from, &to)? {
                Some(values) => print_values(values.iter()),
                None => println!("no data"),
            }
        }

        Commands::DetectionLogList => {
            for day in client.get_detection_log_list()? {
                println!("{day}");
            }
        }

        Commands::DetectionLog { date } => match client.get_detection_log(&date)? {
            Some(rows) => {
                let header = DETECTION_LOG_HEADER.map(String::from).to_vec();
                print_table(&Table::with_header(header, rows));
            }
            None => println!("no entries"),
        },
    }

    Ok(())
}

/// Parse a `host:port` endpoint argument
fn parse_endpoint(s: &str) -> std::result::Result<(String, u16), String> {
    let (host, port) = s
        .rsplit_once(':')
        .ok_or_else(|| "expected host:port".to_string())?;
    let port = port
        .parse::<u16>()
        .map_err(|_| format!("invalid port \"{port}\""))?;
    Ok((host.to_string(), port))
}

fn print_values<'a>(entries: impl Iterator<Item = (&'a str, &'a str)>) {
    for (key, value) in entries {
        println!("{key} = {value}");
    }
}

fn print_table(table: &Table) {
    println!("{}", table.header().join("\t"));
    for row in table.rows() {
        println!("{}", row.join("\t"));
    }
}
