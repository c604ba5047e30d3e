//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Title shown above the account list
pub const APP_TITLE: &str = "Power Platform Accounts";

/// Default Dataverse Web API version
pub const DEFAULT_API_VERSION: &str = "9.2";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default log file name (relative to the working directory)
pub const DEFAULT_LOG_FILE: &str = "accounts-tui.log";

/// Directory under $HOME used when no settings dir is given
pub const SETTINGS_DIR_NAME: &str = ".accounts-tui";

/// Settings file inside the settings dir
pub const SETTINGS_FILE_NAME: &str = "settings.yaml";

/// Entity set holding account records
pub const ACCOUNTS_ENTITY_SET: &str = "accounts";

/// Columns requested when listing accounts
pub const ACCOUNT_COLUMNS: &str = "accountid,name,accountnumber,emailaddress1,telephone1";

/// Banner shown when the session handshake fails
pub const SESSION_INIT_FAILED: &str = "Failed to initialize Power Apps SDK";

/// Name shown for records without a display name
pub const UNNAMED_ACCOUNT: &str = "Unnamed Account";
