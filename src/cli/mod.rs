//! Command-line interface module with comprehensive help system

pub mod help;

pub use help::HelpSystem;

use clap::{Parser, ArgAction};

/// Network Latency Tester - A high-performance tool for measuring network connectivity
#[derive(Parser, Debug, Clone)]
#[command(name = "network-latency-tester")]
#[command(version, about, long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Number of test iterations per DNS configuration
    #[arg(short, long, default_value_t = crate::defaults::DEFAULT_TEST_COUNT)]
    pub count: u32,

    /// Request timeout in seconds
    #[arg(short, long, value_parser = parse_duration, default_value_t = crate::defaults::DEFAULT_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Target URL to test (can be used multiple times)
    #[arg(long = "url", action = ArgAction::Append)]
    pub urls: Vec<String>,

    /// Test the original target URL from bash script
    #[arg(long)]
    pub test_original: bool,

    /// Custom DNS servers (comma-separated)
    #[arg(long)]
    pub dns_servers: Option<String>,

    /// DNS-over-HTTPS providers (comma-separated)
    #[arg(long)]
    pub doh_providers: Option<String>,

    /// Show help for specific topic (config, dns, examples, timeout, output)
    #[arg(long, value_name = "TOPIC")]
    pub help_topic: Option<String>,

    /// Check for updates and manage versions
    #[arg(short = 'u', long)]
    pub update: bool,

    /// Target version for update/downgrade (e.g., "v0.1.7" or "0.1.7")
    #[arg(short = 'v', long, requires = "update")]
    pub version: Option<String>,

    /// Force version change, including downgrades
    #[arg(short = 'f', long, requires = "update")]
    pub force: bool,
}

impl Cli {
    /// Validate CLI arguments for conflicts and requirements
    pub fn validate(&self) -> Result<(), String> {
        // Check for conflicting color flags
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }

        // Skip URL validation if in update mode
        if !self.update {
            // Check that at least one URL is provided (either via --url or --test-original)
            if self.urls.is_empty() && !self.test_original {
                return Err("Must specify at least one URL via --url or use --test-original".to_string());
            }
        }

        // Validate update-related arguments
        if self.version.is_some() && !self.update {
            return Err("--version requires --update to be specified".to_string());
        }

        if self.force && !self.update {
            return Err("--force requires --update to be specified".to_string());
        }

        // Validate version format if provided
        if let Some(ref version_str) = self.version {
            if let Err(e) = crate::updater::Version::parse(version_str) {
                return Err(format!("Invalid version format '{}': {}", version_str, e));
            }
        }

        Ok(())
    }

    /// Get validated URLs for testing
    pub fn get_urls(&self) -> Vec<String> {
        if self.test_original {
            // When --test-original is specified, use only the original target
            vec!["https://target".to_string()]
        } else {
            self.urls.clone()
        }
    }

    /// Check if help should be displayed for a specific topic
    pub fn should_show_topic_help(&self) -> bool {
        self.help_topic.is_some()
    }

    /// Get the help topic if specified
    pub fn get_help_topic(&self) -> Option<&str> {
        self.help_topic.as_deref()
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        if self.color {
            true  // Force color output when --color is specified
        } else if self.no_color {
            false // Disable color output when --no-color is specified
        } else {
            supports_color() // Use automatic detection
        }
    }

    /// Display help for the specified topic or main help
    pub fn display_help(&self) -> String {
        let help_system = HelpSystem::new();
        let use_colors = self.use_colors();

        if let Some(topic) = &self.help_topic {
            help_system.display_topic_help(topic, use_colors)
                .unwrap_or_else(|| {
                    format!("Unknown help topic: '{}'\n\nAvailable topics: config, dns, examples, timeout, output, update\n\n{}", 
                        topic, help_system.display_main_help(use_colors))
                })
        } else {
            help_system.display_main_help(use_colors)
        }
    }

    /// Get configuration summary for display
    pub fn get_config_summary(&self) -> String {
        let mut summary = String::new();
        
        summary.push_str("Configuration Summary:\n");
        summary.push_str(&format!("  Test count: {}\n", self.count));
        summary.push_str(&format!("  Timeout: {}s\n", self.timeout));
        summary.push_str(&format!("  Colored output: {}\n", self.use_colors()));
        summary.push_str(&format!("  Verbose mode: {}\n", self.verbose));
        summary.push_str(&format!("  Debug mode: {}\n", self.debug));
        
        if !self.urls.is_empty() {
            summary.push_str(&format!("  Custom URLs: {}\n", self.urls.join(", ")));
        }
        
        if self.test_original {
            summary.push_str("  Testing original URL: Yes\n");
        }
        
        if let Some(ref dns_servers) = self.dns_servers {
            summary.push_str(&format!("  DNS servers: {}\n", dns_servers));
        }
        
        if let Some(ref doh_providers) = self.doh_providers {
            summary.push_str(&format!("  DoH providers: {}\n", doh_providers));
        }
        
        summary
    }

    /// Convert CLI args to UpdateArgs for update operations
    pub fn to_update_args(&self) -> crate::updater::UpdateArgs {
        crate::updater::UpdateArgs::new(self.update, self.version.clone(), self.force)
    }

    /// Check if running in update mode
    pub fn is_update_mode(&self) -> bool {
        self.update
    }

    /// Check if interactive update mode (update without specific version)
    pub fn is_interactive_update(&self) -> bool {
        self.update && self.version.is_none()
    }

    /// Check if downgrade is forced
    pub fn is_force_downgrade(&self) -> bool {
        self.force
    }
}

/// Parse duration from seconds string
fn parse_duration(s: &str) -> Result<u64, String> {
    // Reject strings with leading + sign or other invalid formats
    if s.starts_with('+') || s.starts_with("0x") || s.starts_with("0X") {
        return Err(format!("Invalid duration: {}", s));
    }
    
    s.parse::<u64>()
        .map_err(|_| format!("Invalid duration: {}", s))
        .and_then(|secs| {
            if secs == 0 {
                Err("Duration must be greater than 0".to_string())
            } else if secs > 300 {
                Err("Duration cannot exceed 300 seconds".to_string())
            } else {
                Ok(secs)
            }
        })
}

/// Check if the terminal supports color output
fn supports_color() -> bool {
    // Check for common environment variables that indicate color support
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    // Check for NO_COLOR environment variable
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check for FORCE_COLOR environment variable
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    // On Windows, check for ANSICON or ConEmu
    #[cfg(target_os = "windows")]
    {
        if std::env::var("ANSICON").is_ok() || std::env::var("ConEmuANSI").is_ok() {
            return true;
        }
    }

    // Default to true on Unix-like systems, false on Windows
    #[cfg(unix)]
    {
        true
    }
    #[cfg(not(unix))]
    {
        false
    }
}
