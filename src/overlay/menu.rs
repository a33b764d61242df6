//! Action menu entries and the messages shown after running them.

use crate::model::constants::MAX_LISTED_COOKIES;
use crate::model::{format_bytes, CookieRecord, DeletionResult};

/// One entry of the floating button's menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    ShowCookies,
    CookieCount,
    DeleteAllCookies,
    /// The host asks the user for the domain before sending the selection.
    DeleteCookiesForDomain(String),
    AppDataSize,
    DeleteAppCaches,
    DeleteAppDocuments,
    DeleteAppPreferences,
    DeleteAllAppData,
    HideButton,
}

impl MenuAction {
    /// Menu entries in display order. The domain entry carries an empty
    /// placeholder until the user types one.
    pub fn entries() -> Vec<MenuAction> {
        vec![
            MenuAction::ShowCookies,
            MenuAction::CookieCount,
            MenuAction::DeleteAllCookies,
            MenuAction::DeleteCookiesForDomain(String::new()),
            MenuAction::AppDataSize,
            MenuAction::DeleteAppCaches,
            MenuAction::DeleteAppDocuments,
            MenuAction::DeleteAppPreferences,
            MenuAction::DeleteAllAppData,
            MenuAction::HideButton,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            MenuAction::ShowCookies => "Show Cookies",
            MenuAction::CookieCount => "Cookie Count",
            MenuAction::DeleteAllCookies => "Delete All Cookies",
            MenuAction::DeleteCookiesForDomain(_) => "Delete Cookies for Domain…",
            MenuAction::AppDataSize => "App Data Size",
            MenuAction::DeleteAppCaches => "Delete App Caches",
            MenuAction::DeleteAppDocuments => "Delete App Documents",
            MenuAction::DeleteAppPreferences => "Delete App Preferences",
            MenuAction::DeleteAllAppData => "Delete All App Data",
            MenuAction::HideButton => "Hide Button",
        }
    }

    /// Shown with the destructive style by the host.
    pub fn is_destructive(&self) -> bool {
        matches!(
            self,
            MenuAction::DeleteAllCookies
                | MenuAction::DeleteCookiesForDomain(_)
                | MenuAction::DeleteAppCaches
                | MenuAction::DeleteAppDocuments
                | MenuAction::DeleteAppPreferences
                | MenuAction::DeleteAllAppData
        )
    }

    /// The host must prompt for text before reporting this selection.
    pub fn needs_domain(&self) -> bool {
        matches!(self, MenuAction::DeleteCookiesForDomain(_))
    }
}

/// What running a menu action produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionReport {
    Deleted(DeletionResult),
    Cookies(Vec<CookieRecord>),
    CookieCount(usize),
    DataSize(u64),
}

/// Title and body of the alert shown after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultMessage {
    pub title: String,
    pub body: String,
    pub succeeded: bool,
}

impl ResultMessage {
    pub fn describe(action: &MenuAction, report: &ActionReport) -> Self {
        match report {
            ActionReport::Deleted(result) => Self::deletion(action, result),
            ActionReport::Cookies(cookies) => Self {
                title: format!("{} Cookies", cookies.len()),
                body: list_cookies(cookies),
                succeeded: true,
            },
            ActionReport::CookieCount(count) => Self {
                title: "Cookie Count".to_string(),
                body: format!("{count} cookie(s) stored"),
                succeeded: true,
            },
            ActionReport::DataSize(bytes) => Self {
                title: "App Data Size".to_string(),
                body: format_bytes(*bytes),
                succeeded: true,
            },
        }
    }

    fn deletion(action: &MenuAction, result: &DeletionResult) -> Self {
        let what = match action {
            MenuAction::DeleteCookiesForDomain(domain) => format!("cookies for {domain}"),
            MenuAction::DeleteAllCookies => "cookies".to_string(),
            MenuAction::DeleteAppCaches => "cache entries".to_string(),
            MenuAction::DeleteAppDocuments => "documents".to_string(),
            MenuAction::DeleteAppPreferences => "preference files".to_string(),
            _ => "items".to_string(),
        };
        if !result.succeeded {
            return Self {
                title: "Deletion Failed".to_string(),
                body: format!("Could not delete {what}"),
                succeeded: false,
            };
        }
        let mut body = format!("Deleted {} {what}", result.items_affected);
        if let Some(bytes) = result.reclaimed_bytes {
            body.push_str(&format!(", freed {}", format_bytes(bytes)));
        }
        Self {
            title: "Done".to_string(),
            body,
            succeeded: true,
        }
    }
}

fn list_cookies(cookies: &[CookieRecord]) -> String {
    if cookies.is_empty() {
        return "No cookies stored".to_string();
    }
    let mut lines: Vec<String> = cookies
        .iter()
        .take(MAX_LISTED_COOKIES)
        .map(ToString::to_string)
        .collect();
    if cookies.len() > MAX_LISTED_COOKIES {
        lines.push(format!("… and {} more", cookies.len() - MAX_LISTED_COOKIES));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_have_titles() {
        let entries = MenuAction::entries();
        assert_eq!(entries.len(), 10);
        for e in &entries {
            assert!(!e.title().is_empty());
        }
        assert_eq!(entries.iter().filter(|e| e.needs_domain()).count(), 1);
    }

    #[test]
    fn test_destructive_flags() {
        assert!(MenuAction::DeleteAllAppData.is_destructive());
        assert!(!MenuAction::ShowCookies.is_destructive());
        assert!(!MenuAction::HideButton.is_destructive());
    }

    #[test]
    fn test_describe_failed_deletion() {
        let msg = ResultMessage::describe(
            &MenuAction::DeleteAppCaches,
            &ActionReport::Deleted(DeletionResult::failure()),
        );
        assert!(!msg.succeeded);
        assert_eq!(msg.body, "Could not delete cache entries");
    }

    #[test]
    fn test_describe_successful_deletion_with_bytes() {
        let msg = ResultMessage::describe(
            &MenuAction::DeleteAllAppData,
            &ActionReport::Deleted(DeletionResult::success_with_bytes(4, 2048)),
        );
        assert!(msg.succeeded);
        assert_eq!(msg.body, "Deleted 4 items, freed 2.0 KB");
    }

    #[test]
    fn test_describe_domain_deletion() {
        let msg = ResultMessage::describe(
            &MenuAction::DeleteCookiesForDomain("example.com".into()),
            &ActionReport::Deleted(DeletionResult::success(2)),
        );
        assert_eq!(msg.body, "Deleted 2 cookies for example.com");
    }

    #[test]
    fn test_cookie_list_is_truncated() {
        let cookies: Vec<_> = (0..MAX_LISTED_COOKIES + 3)
            .map(|i| CookieRecord::new("example.com", format!("c{i}"), "/"))
            .collect();
        let msg = ResultMessage::describe(&MenuAction::ShowCookies, &ActionReport::Cookies(cookies));
        assert!(msg.body.ends_with("… and 3 more"));
        assert_eq!(msg.body.lines().count(), MAX_LISTED_COOKIES + 1);
    }

    #[test]
    fn test_empty_cookie_list() {
        let msg = ResultMessage::describe(&MenuAction::ShowCookies, &ActionReport::Cookies(Vec::new()));
        assert_eq!(msg.body, "No cookies stored");
    }
}
