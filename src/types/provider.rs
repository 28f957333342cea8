use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use specta::Type;

/// The closed set of webhook sources an endpoint can be provisioned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Stripe,
    Flutterwave,
    Paystack,
    Github,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 4] = [
        ProviderKind::Stripe,
        ProviderKind::Flutterwave,
        ProviderKind::Paystack,
        ProviderKind::Github,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::Stripe => "stripe",
            ProviderKind::Flutterwave => "flutterwave",
            ProviderKind::Paystack => "paystack",
            ProviderKind::Github => "github",
        }
    }

    /// Name of the request header carrying this provider's signature material.
    pub fn signature_header(self) -> &'static str {
        match self {
            ProviderKind::Stripe => "stripe-signature",
            ProviderKind::Flutterwave => "verif-hash",
            ProviderKind::Paystack => "x-paystack-signature",
            ProviderKind::Github => "x-hub-signature-256",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownProvider(pub String);

impl fmt::Display for UnknownProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported provider: {}", self.0)
    }
}

impl std::error::Error for UnknownProvider {}

impl FromStr for ProviderKind {
    type Err = UnknownProvider;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "stripe" => Ok(ProviderKind::Stripe),
            "flutterwave" => Ok(ProviderKind::Flutterwave),
            "paystack" => Ok(ProviderKind::Paystack),
            "github" => Ok(ProviderKind::Github),
            other => Err(UnknownProvider(other.to_string())),
        }
    }
}
