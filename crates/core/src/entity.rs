use serde::{Deserialize, Serialize};

/// The data collections of a commissioning report. Each reconciles
/// independently; `Inverters` doubles as the ordered reference list used to
/// resolve positional indices for string measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityType {
    Inverters,
    ProtectionBreakers,
    ProtectionCables,
    ClampMeasurements,
    StringMeasurements,
    TelemetryCredentials,
    CommunicationDevices,
    SmartMeters,
    EnergyMeters,
    PunchListItems,
}

impl EntityType {
    pub const ALL: [EntityType; 10] = [
        Self::Inverters,
        Self::ProtectionBreakers,
        Self::ProtectionCables,
        Self::ClampMeasurements,
        Self::StringMeasurements,
        Self::TelemetryCredentials,
        Self::CommunicationDevices,
        Self::SmartMeters,
        Self::EnergyMeters,
        Self::PunchListItems,
    ];

    /// Stable key of this collection inside a draft snapshot document.
    pub fn as_key(&self) -> &'static str {
        match self {
            Self::Inverters => "inverters",
            Self::ProtectionBreakers => "protection_breakers",
            Self::ProtectionCables => "protection_cables",
            Self::ClampMeasurements => "clamp_measurements",
            Self::StringMeasurements => "string_measurements",
            Self::TelemetryCredentials => "telemetry_credentials",
            Self::CommunicationDevices => "communication_devices",
            Self::SmartMeters => "smart_meters",
            Self::EnergyMeters => "energy_meters",
            Self::PunchListItems => "punch_list_items",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_key() == key)
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_key())
    }
}
