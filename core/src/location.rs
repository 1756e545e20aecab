// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Device location: permission tracking and single-shot position queries.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::geo::Coordinate;

/// Default time allowed for a single position query.
pub const DEFAULT_LOCATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Precision of a granted location permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Precision {
    /// Approximate (network based) location.
    Coarse,
    /// Precise (GPS) location.
    Fine,
}

/// Result of asking the platform for a location permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionResult {
    /// The user granted access at the given precision.
    Granted(Precision),
    /// The user refused. `can_ask_again` is false once the platform stops
    /// showing the prompt and the user has to go through system settings.
    Denied {
        /// Whether a new prompt may be shown.
        can_ask_again: bool,
    },
}

/// Known permission status of the app.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PermissionState {
    /// No request result received yet.
    #[default]
    Unknown,
    /// Location access granted.
    Granted(Precision),
    /// Refused, the user may be asked again.
    DeniedSoft,
    /// Refused for good, only system settings can grant it.
    DeniedPermanently,
}

/// What the user has to do to enable location access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remedy {
    /// Nothing, access is granted.
    None,
    /// Show the permission prompt.
    Prompt,
    /// Send the user to the system settings.
    OpenSettings,
}

impl PermissionState {
    /// Next state after the platform reports `result`.
    pub fn apply(self, result: PermissionResult) -> Self {
        let next = match result {
            PermissionResult::Granted(precision) => Self::Granted(precision),
            PermissionResult::Denied {
                can_ask_again: true,
            } => Self::DeniedSoft,
            PermissionResult::Denied {
                can_ask_again: false,
            } => Self::DeniedPermanently,
        };
        tracing::debug!(from = ?self, to = ?next, "permission state changed");
        next
    }

    /// The action that would let the app use the location.
    pub fn remedy(self) -> Remedy {
        match self {
            Self::Granted(_) => Remedy::None,
            Self::Unknown | Self::DeniedSoft => Remedy::Prompt,
            Self::DeniedPermanently => Remedy::OpenSettings,
        }
    }

    /// Whether at least coarse access is granted.
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted(_))
    }
}

/// Failure of the position query itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("location provider error: {0}")]
pub struct ProviderError(pub String);

/// Source of the device position.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Whether the system location service is switched on.
    async fn is_enabled(&self) -> bool;

    /// The currently granted precision, if any.
    async fn permission(&self) -> Option<Precision>;

    /// Prompts the user for location access.
    async fn request_permission(&self) -> PermissionResult;

    /// A single best-effort, high-accuracy position query.
    async fn current_position(&self) -> Result<Coordinate, ProviderError>;
}

/// Why an acquisition failed.
#[derive(Debug, Clone, PartialEq)]
pub enum FailureReason {
    /// The system location service is off.
    LocationDisabled,
    /// No location permission is granted.
    PermissionMissing,
    /// The provider failed or timed out.
    Provider(String),
}

/// Observable state of the acquirer.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AcquisitionState {
    /// No request made yet.
    #[default]
    Idle,
    /// A position request is in flight.
    Acquiring,
    /// The last request produced a fix.
    Ready(Coordinate),
    /// The last request failed.
    Failed(FailureReason),
}

/// Outcome of [`LocationAcquirer::acquire`]. Every caller handles every case.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationOutcome {
    /// The system location service is off.
    Disabled,
    /// No location permission is granted.
    PermissionMissing,
    /// A fresh fix.
    Ready(Coordinate),
    /// The provider failed or timed out.
    ProviderError(String),
}

impl LocationOutcome {
    /// The coordinate, if the outcome is a fix.
    pub fn coordinate(&self) -> Option<&Coordinate> {
        match self {
            Self::Ready(c) => Some(c),
            _ => None,
        }
    }
}

/// Obtains the device position on demand, subject to the location service
/// being enabled and a permission being granted.
///
/// `acquire` takes `&mut self`, so an acquirer never has two requests in
/// flight. State changes are published to subscribers.
#[derive(Debug)]
pub struct LocationAcquirer<P> {
    provider: P,
    timeout: Duration,
    state: watch::Sender<AcquisitionState>,
    permission: PermissionState,
}

impl<P: LocationProvider> LocationAcquirer<P> {
    /// Creates an idle acquirer around `provider`.
    pub fn new(provider: P) -> Self {
        let (state, _) = watch::channel(AcquisitionState::Idle);
        Self {
            provider,
            timeout: DEFAULT_LOCATION_TIMEOUT,
            state,
            permission: PermissionState::Unknown,
        }
    }

    /// Sets the time allowed for a single position query.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<AcquisitionState> {
        self.state.subscribe()
    }

    /// Current state.
    pub fn state(&self) -> AcquisitionState {
        self.state.borrow().clone()
    }

    /// Last known permission status.
    pub fn permission(&self) -> PermissionState {
        self.permission
    }

    /// The underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Prompts for permission and records the result.
    pub async fn request_permission(&mut self) -> PermissionState {
        let result = self.provider.request_permission().await;
        self.permission = self.permission.apply(result);
        self.permission
    }

    /// Requests a single position fix.
    ///
    /// Fails immediately, without entering [`AcquisitionState::Acquiring`],
    /// when the location service is off or no permission is granted. There is
    /// no automatic retry.
    #[tracing::instrument(skip(self))]
    pub async fn acquire(&mut self) -> LocationOutcome {
        if !self.provider.is_enabled().await {
            tracing::info!("location service disabled");
            self.publish(AcquisitionState::Failed(FailureReason::LocationDisabled));
            return LocationOutcome::Disabled;
        }

        match self.provider.permission().await {
            Some(precision) => self.permission = PermissionState::Granted(precision),
            None => {
                if self.permission.is_granted() {
                    // revoked since the last check
                    self.permission = PermissionState::Unknown;
                }
                tracing::info!(permission = ?self.permission, "location permission missing");
                self.publish(AcquisitionState::Failed(FailureReason::PermissionMissing));
                return LocationOutcome::PermissionMissing;
            }
        }

        self.publish(AcquisitionState::Acquiring);
        match tokio::time::timeout(self.timeout, self.provider.current_position()).await {
            Ok(Ok(coordinate)) => {
                tracing::debug!(%coordinate, "position fix acquired");
                self.publish(AcquisitionState::Ready(coordinate));
                LocationOutcome::Ready(coordinate)
            }
            Ok(Err(ProviderError(reason))) => {
                tracing::warn!(%reason, "position request failed");
                let failure = FailureReason::Provider(reason.clone());
                self.publish(AcquisitionState::Failed(failure));
                LocationOutcome::ProviderError(reason)
            }
            Err(_) => {
                let reason = format!("no fix within {}s", self.timeout.as_secs_f64());
                tracing::warn!(%reason, "position request timed out");
                let failure = FailureReason::Provider(reason.clone());
                self.publish(AcquisitionState::Failed(failure));
                LocationOutcome::ProviderError(reason)
            }
        }
    }

    fn publish(&self, state: AcquisitionState) {
        self.state.send_replace(state);
    }
}

/// Provider reporting a fixed position, always enabled and granted.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocationProvider {
    position: Coordinate,
}

impl FixedLocationProvider {
    /// Creates a provider that always answers `position`.
    pub fn new(position: Coordinate) -> Self {
        Self { position }
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn is_enabled(&self) -> bool {
        true
    }

    async fn permission(&self) -> Option<Precision> {
        Some(Precision::Fine)
    }

    async fn request_permission(&self) -> PermissionResult {
        PermissionResult::Granted(Precision::Fine)
    }

    async fn current_position(&self) -> Result<Coordinate, ProviderError> {
        Ok(self.position)
    }
}

/// Provider for a device whose location service is switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableLocationProvider;

#[async_trait]
impl LocationProvider for UnavailableLocationProvider {
    async fn is_enabled(&self) -> bool {
        false
    }

    async fn permission(&self) -> Option<Precision> {
        None
    }

    async fn request_permission(&self) -> PermissionResult {
        PermissionResult::Denied {
            can_ask_again: true,
        }
    }

    async fn current_position(&self) -> Result<Coordinate, ProviderError> {
        Err(ProviderError("location service is disabled".to_string()))
    }
}
