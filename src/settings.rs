use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKey {
    EmailNotifications,
    DownloadNotifications,
    StorageAlerts,
    TwoFactorAuth,
    FileSharing,
    AutoBackup,
}

impl SettingKey {
    pub const ALL: [SettingKey; 6] = [
        SettingKey::EmailNotifications,
        SettingKey::DownloadNotifications,
        SettingKey::StorageAlerts,
        SettingKey::TwoFactorAuth,
        SettingKey::FileSharing,
        SettingKey::AutoBackup,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SettingKey::EmailNotifications => "Email Notifications",
            SettingKey::DownloadNotifications => "Download Notifications",
            SettingKey::StorageAlerts => "Storage Alerts",
            SettingKey::TwoFactorAuth => "Two-Factor Authentication",
            SettingKey::FileSharing => "File Sharing",
            SettingKey::AutoBackup => "Auto Backup",
        }
    }

    pub fn section(self) -> &'static str {
        match self {
            SettingKey::EmailNotifications
            | SettingKey::DownloadNotifications
            | SettingKey::StorageAlerts => "Notifications",
            SettingKey::TwoFactorAuth | SettingKey::FileSharing => "Security",
            SettingKey::AutoBackup => "Storage",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Preferences shown on the settings page. Kept for the session only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub email_notifications: bool,
    pub download_notifications: bool,
    pub storage_alerts: bool,
    pub two_factor_auth: bool,
    pub file_sharing: bool,
    pub auto_backup: bool,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            download_notifications: true,
            storage_alerts: true,
            two_factor_auth: false,
            file_sharing: true,
            auto_backup: false,
            theme: Theme::Light,
        }
    }
}

impl Settings {
    pub fn get(&self, key: SettingKey) -> bool {
        match key {
            SettingKey::EmailNotifications => self.email_notifications,
            SettingKey::DownloadNotifications => self.download_notifications,
            SettingKey::StorageAlerts => self.storage_alerts,
            SettingKey::TwoFactorAuth => self.two_factor_auth,
            SettingKey::FileSharing => self.file_sharing,
            SettingKey::AutoBackup => self.auto_backup,
        }
    }

    pub fn set(&mut self, key: SettingKey, value: bool) {
        let slot = match key {
            SettingKey::EmailNotifications => &mut self.email_notifications,
            SettingKey::DownloadNotifications => &mut self.download_notifications,
            SettingKey::StorageAlerts => &mut self.storage_alerts,
            SettingKey::TwoFactorAuth => &mut self.two_factor_auth,
            SettingKey::FileSharing => &mut self.file_sharing,
            SettingKey::AutoBackup => &mut self.auto_backup,
        };
        *slot = value;
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }
}
