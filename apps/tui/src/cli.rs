use clap::Parser;

use crate::config::{API_BASE_VAR, LISTING_ENDPOINT_VAR};

#[derive(Debug, Parser)]
#[command(name = "stock_league_tui", version, about = "Stock League company cards")]
pub struct CliArgs {
    /// Print the cards and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the company records as JSON and exit
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Do not check whether card images can be loaded
    #[arg(long = "no-probe")]
    pub no_probe: bool,

    /// Backend origin: "local", "same-origin" or a full URL
    #[arg(long = "api-base", value_name = "URL")]
    pub api_base: Option<String>,

    /// Override the company listing endpoint
    #[arg(long, value_name = "PATH")]
    pub endpoint: Option<String>,

    /// Show the drafted companies instead of the listing
    #[arg(long, conflicts_with = "company")]
    pub drafted: bool,

    /// Show a single company by id
    #[arg(long, value_name = "ID")]
    pub company: Option<u32>,
}

/// Which backend collection the viewer shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Source {
    #[default]
    Listing,
    Drafted,
    Company(u32),
}

impl Source {
    pub fn title(self) -> String {
        match self {
            Self::Listing => "Companies".to_string(),
            Self::Drafted => "Drafted companies".to_string(),
            Self::Company(id) => format!("Company #{id}"),
        }
    }
}

impl CliArgs {
    /// Whether to print and exit instead of opening the full-screen viewer.
    pub const fn wants_headless(&self) -> bool {
        self.headless || self.json
    }

    pub const fn source(&self) -> Source {
        if let Some(id) = self.company {
            Source::Company(id)
        } else if self.drafted {
            Source::Drafted
        } else {
            Source::Listing
        }
    }

    pub fn apply_env_overrides(&self) {
        if let Some(base) = &self.api_base {
            std::env::set_var(API_BASE_VAR, base);
        }
        if let Some(endpoint) = &self.endpoint {
            std::env::set_var(LISTING_ENDPOINT_VAR, endpoint);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CliArgs, Source};
    use clap::Parser;

    #[test]
    fn json_implies_headless() {
        let args = CliArgs::parse_from(["stock_league_tui", "--json"]);
        assert!(args.wants_headless());
        assert!(!args.headless);
    }

    #[test]
    fn parses_backend_overrides() {
        let args = CliArgs::parse_from([
            "stock_league_tui",
            "--api-base",
            "https://league.example.com",
            "--endpoint",
            "/companies",
            "--no-probe",
        ]);

        assert_eq!(args.api_base.as_deref(), Some("https://league.example.com"));
        assert_eq!(args.endpoint.as_deref(), Some("/companies"));
        assert!(args.no_probe);
        assert!(!args.wants_headless());
        assert_eq!(args.source(), Source::Listing);
    }

    #[test]
    fn picks_the_requested_source() {
        let drafted = CliArgs::parse_from(["stock_league_tui", "--drafted"]);
        assert_eq!(drafted.source(), Source::Drafted);

        let company = CliArgs::parse_from(["stock_league_tui", "--company", "7"]);
        assert_eq!(company.source(), Source::Company(7));
        assert_eq!(company.source().title(), "Company #7");
    }

    #[test]
    fn drafted_and_company_are_exclusive() {
        let result = CliArgs::try_parse_from(["stock_league_tui", "--drafted", "--company", "2"]);
        assert!(result.is_err());
    }
}
