//! Constants shared between the analyzer, the fixer, and the host.
//!
//! These strings are the routing contract: the host dispatches diagnostics to
//! the fixer by [`RULE_ID`], so they stay stable across versions.

/// Rule identifier shared by the constructor pass and the callback pass.
pub const RULE_ID: &str = "MefImportExceptionAnalyzer";

pub const RULE_TITLE: &str = "MEF Import exception Logger";

pub const RULE_MESSAGE: &str = "There's a MEF ImportingConstructor without a try..catch block .";

pub const RULE_DESCRIPTION: &str =
    "All MEF ImportingConstructor should have a try..catch on entire content.";

pub const RULE_CATEGORY: &str = "MEF";

/// Attribute that marks a constructor as invoked by the composition container.
pub const INJECTION_MARKER: &str = "ImportingConstructor";

/// Interfaces under this prefix belong to the hosting IDE; their
/// implementations may be called back outside normal control flow.
pub const HOST_INTERFACE_PREFIX: &str = "Microsoft.VisualStudio.";

pub const CATCH_VARIABLE: &str = "e";

pub const CATCH_EXCEPTION_TYPE: &str = "Exception";

/// Two positional arguments: message, exception.
pub const LOGGER_CALL: &str = "ErrorNotificationLogger.LogErrorWithoutShowingErrorNotificationUI";

pub const ERROR_NOTIFICATION_NAMESPACE: &str = "DebuggerShared.Services.ErrorNotification";

pub const SYSTEM_NAMESPACE: &str = "System";

/// Message logged by the constructor-only fixer. The misspelling is part of the
/// established log output and is kept verbatim.
pub const CONSTRUCTOR_FIX_MESSAGE: &str = "Erorr in MEF ctor";

pub const FIX_TITLE: &str = "Add try.. catch inside";

/// Inline suppression marker recognised in comments.
pub const SUPPRESSION_MARKER: &str = "mefguard-ignore";

/// Project-level config file name.
pub const CONFIG_FILE_NAME: &str = "mefguard.toml";

/// Gitignore-syntax file with extra scan exclusions.
pub const IGNORE_FILE_NAME: &str = ".mefguardignore";
