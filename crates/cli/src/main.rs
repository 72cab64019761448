use clap::{Args, Parser, Subcommand};
use clinic_client::{
    ClientConfig, ClinicClient, GetClinicStation, GetVaccine, Health, StatusCode,
};
use serde_json::Value;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "clinic")]
#[command(about = "Clinic records API command-line client")]
struct Cli {
    #[command(flatten)]
    server: ServerArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct ServerArgs {
    /// API host
    #[arg(long, default_value = clinic_client::config::DEFAULT_HOST, global = true)]
    host: String,
    /// API port
    #[arg(long, default_value_t = clinic_client::config::DEFAULT_PORT, global = true)]
    port: u16,
    /// API token (optional)
    #[arg(long, env = "CLINIC_API_TOKEN", global = true)]
    token: Option<String>,
    /// Request timeout in seconds
    #[arg(long, default_value_t = 30, global = true)]
    timeout: u64,
}

impl ServerArgs {
    fn client_config(&self) -> ClientConfig {
        let mut cfg = ClientConfig::new(self.host.clone(), self.port)
            .with_timeout(Duration::from_secs(self.timeout));
        cfg.token = self.token.clone();
        cfg
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Check the server is up
    Health,
    /// List the stations staffed during a clinic, or show one of them
    ClinicStations {
        /// Clinic id
        #[arg(short, long)]
        clinic: i64,
        /// Clinic station id (optional)
        #[arg(short, long)]
        id: Option<i64>,
    },
    /// Show vaccine records by patient and/or clinic, or one record by id
    Vaccines {
        /// Patient id
        #[arg(long)]
        patient: Option<i64>,
        /// Clinic id
        #[arg(long)]
        clinic: Option<i64>,
        /// Vaccine record id
        #[arg(long)]
        id: Option<i64>,
    },
}

/// Renders a JSON scalar without the quotes strings get from `Display`.
fn plain(v: &Value) -> String {
    v.as_str().map_or_else(|| v.to_string(), str::to_owned)
}

fn describe_clinic_station(clinic: i64, cs: &Value) -> String {
    format!(
        "clinic {} station id {} id {} name {}",
        clinic,
        plain(&cs["station"]),
        plain(&cs["id"]),
        plain(&cs["name"])
    )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = ClinicClient::new(cli.server.client_config())?;

    match cli.command {
        Some(Commands::Health) => {
            let (status, body) = client.send(&Health).await?;
            println!("{status}: {}", plain(&body["message"]));
        }
        Some(Commands::ClinicStations { clinic, id }) => {
            let mut req = GetClinicStation::new();
            req.set_clinic(clinic);
            if let Some(id) = id {
                req.set_id(id);
            }
            let (status, body) = client.send(&req).await?;
            if status != StatusCode::OK {
                match id {
                    Some(id) => eprintln!(
                        "Error getting clinic station {id} for clinic id {clinic}: {status}"
                    ),
                    None => {
                        eprintln!("Error getting all clinic stations for clinic id {clinic}: {status}")
                    }
                }
            } else if let Value::Array(stations) = &body {
                for cs in stations {
                    println!("{}", describe_clinic_station(clinic, cs));
                }
            } else {
                println!("{}", describe_clinic_station(clinic, &body));
            }
        }
        Some(Commands::Vaccines {
            patient,
            clinic,
            id,
        }) => {
            let mut req = match id {
                Some(id) => GetVaccine::by_id(id),
                None => GetVaccine::new(),
            };
            if let Some(patient) = patient {
                req.set_patient(patient);
            }
            if let Some(clinic) = clinic {
                req.set_clinic(clinic);
            }
            let (status, body) = client.send(&req).await?;
            if status == StatusCode::OK {
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                eprintln!(
                    "Error getting vaccine records: {status}: {}",
                    plain(&body["error"]["message"])
                );
            }
        }
        None => {
            println!("Use 'clinic --help' for commands");
        }
    }

    Ok(())
}
