//! One-time capability probe.
//!
//! The OS version and device idiom are read once at bootstrap and folded into
//! a fixed [`Capabilities`] value; nothing else branches on versions.

use std::cmp::Ordering;
use std::fmt;

/// Dotted numeric version (`17.4.1`). Missing components compare as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OsVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl OsVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }

    /// Lenient parse: non-numeric suffixes are dropped (`"18.0b2"` → 18.0.0).
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.trim().split('.').map(|p| {
            let digits: String = p.chars().take_while(char::is_ascii_digit).collect();
            digits.parse::<u32>().ok()
        });
        let major = parts.next().flatten()?;
        let minor = parts.next().flatten().unwrap_or(0);
        let patch = parts.next().flatten().unwrap_or(0);
        Some(Self::new(major, minor, patch))
    }

    pub fn at_least(&self, major: u32, minor: u32) -> bool {
        *self >= OsVersion::new(major, minor, 0)
    }
}

impl PartialOrd for OsVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OsVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch))
    }
}

impl fmt::Display for OsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceIdiom {
    Phone,
    Pad,
    Other,
}

/// How to enumerate the host's windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowLookup {
    /// `UIApplication.connectedScenes` → `UIWindowScene.windows` (iOS 13+).
    ConnectedScenes,
    /// `UIApplication.windows`.
    ApplicationWindows,
}

/// Background material of the button and panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlurStyle {
    SystemMaterialDark,
    Dark,
}

impl BlurStyle {
    /// `UIBlurEffectStyle` raw value.
    pub fn raw_value(self) -> isize {
        match self {
            BlurStyle::SystemMaterialDark => 16,
            BlurStyle::Dark => 2,
        }
    }
}

/// How the action menu is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuStyle {
    ActionSheet,
    /// Action sheets need a popover anchor on iPad; a centred alert does not.
    Alert,
}

impl MenuStyle {
    /// `UIAlertControllerStyle` raw value.
    pub fn raw_value(self) -> isize {
        match self {
            MenuStyle::ActionSheet => 0,
            MenuStyle::Alert => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub os: OsVersion,
    pub window_lookup: WindowLookup,
    pub blur_style: BlurStyle,
    pub menu_style: MenuStyle,
}

impl Capabilities {
    pub fn probe(os: OsVersion, idiom: DeviceIdiom) -> Self {
        let scenes = os.at_least(13, 0);
        Self {
            os,
            window_lookup: if scenes {
                WindowLookup::ConnectedScenes
            } else {
                WindowLookup::ApplicationWindows
            },
            blur_style: if scenes {
                BlurStyle::SystemMaterialDark
            } else {
                BlurStyle::Dark
            },
            menu_style: match idiom {
                DeviceIdiom::Phone => MenuStyle::ActionSheet,
                DeviceIdiom::Pad | DeviceIdiom::Other => MenuStyle::Alert,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_versions() {
        assert_eq!(OsVersion::parse("17.4.1"), Some(OsVersion::new(17, 4, 1)));
        assert_eq!(OsVersion::parse("12"), Some(OsVersion::new(12, 0, 0)));
        assert_eq!(OsVersion::parse(" 18.0b2 "), Some(OsVersion::new(18, 0, 0)));
        assert_eq!(OsVersion::parse("26.1"), Some(OsVersion::new(26, 1, 0)));
        assert_eq!(OsVersion::parse(""), None);
        assert_eq!(OsVersion::parse("beta"), None);
    }

    #[test]
    fn test_numeric_ordering() {
        assert!(OsVersion::new(13, 10, 0) > OsVersion::new(13, 9, 9));
        assert!(OsVersion::new(26, 0, 0).at_least(18, 0));
        assert!(!OsVersion::new(12, 5, 7).at_least(13, 0));
    }

    #[test]
    fn test_modern_phone() {
        let caps = Capabilities::probe(OsVersion::new(17, 0, 0), DeviceIdiom::Phone);
        assert_eq!(caps.window_lookup, WindowLookup::ConnectedScenes);
        assert_eq!(caps.blur_style, BlurStyle::SystemMaterialDark);
        assert_eq!(caps.menu_style, MenuStyle::ActionSheet);
    }

    #[test]
    fn test_legacy_pad() {
        let caps = Capabilities::probe(OsVersion::new(12, 4, 0), DeviceIdiom::Pad);
        assert_eq!(caps.window_lookup, WindowLookup::ApplicationWindows);
        assert_eq!(caps.blur_style, BlurStyle::Dark);
        assert_eq!(caps.menu_style, MenuStyle::Alert);
    }
}
