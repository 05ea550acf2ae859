//! Contract, analysis and feedback types
//!
//! These types mirror the JSON the backend serves. The client renders them
//! and never derives business facts of its own; the one piece of local
//! interpretation is [`RiskLevel`], a pure display bucketing of the
//! backend-computed risk score.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::DomainError;
use super::newtypes::{ContractId, Rating};

// ============================================================================
// Contract status
// ============================================================================

/// Analysis lifecycle status of a contract, as reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    /// Uploaded, analysis not started yet
    Pending,
    /// Analysis in progress
    Processing,
    /// Analysis finished successfully
    Completed,
    /// Analysis failed
    Failed,
    /// Any status this client version does not know
    #[serde(other)]
    Unknown,
}

impl ContractStatus {
    /// Returns true once analysis has finished successfully
    pub fn is_completed(&self) -> bool {
        matches!(self, ContractStatus::Completed)
    }
}

impl std::fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ContractStatus::Pending => "pending",
            ContractStatus::Processing => "processing",
            ContractStatus::Completed => "completed",
            ContractStatus::Failed => "failed",
            ContractStatus::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

// ============================================================================
// Risk
// ============================================================================

/// Display bucketing of the backend risk score (0..=100)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    /// Score below 40
    Low,
    /// Score 40..70
    Medium,
    /// Score 70 and above
    High,
}

impl RiskLevel {
    /// Buckets a risk score; a missing score counts as zero
    pub fn from_score(score: Option<u8>) -> Self {
        match score.unwrap_or(0) {
            70.. => RiskLevel::High,
            40.. => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::High => "High Risk",
        };
        write!(f, "{}", s)
    }
}

/// A single risk factor identified by the analysis.
///
/// The backend is inconsistent about whether the headline lives in
/// `factor` or `title`, so both are kept and [`RiskFactor::label`]
/// resolves the fallback chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactor {
    /// Headline of the risk factor (primary field)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factor: Option<String>,
    /// Alternate headline field used by some analysis versions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Longer explanation of the risk
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RiskFactor {
    /// Headline text: `factor`, falling back to `title`, falling back to a
    /// positional placeholder
    pub fn label(&self, index: usize) -> String {
        self.factor
            .clone()
            .or_else(|| self.title.clone())
            .unwrap_or_else(|| format!("Risk Factor {}", index + 1))
    }

    /// Description text with the backend's placeholder fallback
    pub fn description_text(&self) -> &str {
        self.description
            .as_deref()
            .unwrap_or("No description available")
    }
}

// ============================================================================
// Contract records
// ============================================================================

/// Full owner-facing contract record, as returned by `GET /contracts/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    /// Backend-assigned identifier
    pub id: ContractId,
    /// Contract title
    pub title: String,
    /// Free-text contract type ("nda", "employment", custom, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_type: Option<String>,
    /// Optional description supplied at upload time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Name of the uploaded file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Analysis lifecycle status
    pub status: ContractStatus,
    /// Backend-computed risk score (0..=100), present once analyzed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<u8>,
    /// Identified risk factors, present once analyzed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_factors: Option<Vec<RiskFactor>>,
    /// Analysis recommendations text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<String>,
    /// Upload timestamp
    pub created_at: DateTime<Utc>,
}

impl Contract {
    /// Display bucket for the risk score
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_score(self.risk_score)
    }
}

/// The restricted subset of a contract exposed to anonymous shared-link
/// viewers. Owner-only fields (id, file name, upload time) are absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractProjection {
    /// Contract title
    pub title: String,
    /// Free-text contract type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_type: Option<String>,
    /// Analysis lifecycle status
    pub status: ContractStatus,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Backend-computed risk score (0..=100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<u8>,
    /// Identified risk factors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_factors: Option<Vec<RiskFactor>>,
    /// Analysis recommendations text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<String>,
}

impl ContractProjection {
    /// Display bucket for the risk score
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_score(self.risk_score)
    }
}

// ============================================================================
// Analysis summary
// ============================================================================

/// Metadata about the analysis run, shown alongside shared contracts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Name of the model that produced the analysis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_model_used: Option<String>,
    /// Wall-clock processing time in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_time_seconds: Option<f64>,
    /// When the analysis started
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    /// When the analysis completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Analysis status, if the backend includes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ContractStatus>,
}

// ============================================================================
// Comments and feedback
// ============================================================================

/// A feedback comment left on a shared contract.
///
/// Created by the anonymous feedback-submission operation; never mutated
/// or deleted from this client. Ordering is backend-owned and preserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Server-assigned identifier
    pub id: i64,
    /// Display name supplied by the commenter
    pub commenter_name: String,
    /// Optional contact email supplied by the commenter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commenter_email: Option<String>,
    /// The comment body
    pub comment_text: String,
    /// Optional 1-5 star rating
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    /// Server-assigned creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Locally composed feedback, validated before dispatch and preserved
/// across transient submission failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackDraft {
    /// Commenter display name (required)
    pub commenter_name: String,
    /// Optional contact email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commenter_email: Option<String>,
    /// Comment body (required)
    pub comment_text: String,
    /// Star rating, defaults to 5
    pub rating: Rating,
}

impl FeedbackDraft {
    /// An empty draft with the default rating, as the form starts out
    pub fn empty() -> Self {
        Self {
            commenter_name: String::new(),
            commenter_email: None,
            comment_text: String::new(),
            rating: Rating::default(),
        }
    }

    /// Client-side validation, run before any network dispatch
    ///
    /// # Errors
    /// Returns the first missing required field
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.commenter_name.trim().is_empty() {
            return Err(DomainError::MissingField("commenter_name"));
        }
        if self.comment_text.trim().is_empty() {
            return Err(DomainError::MissingField("comment_text"));
        }
        Ok(())
    }
}

impl Default for FeedbackDraft {
    fn default() -> Self {
        Self::empty()
    }
}

// ============================================================================
// Shared view and share links
// ============================================================================

/// Everything an anonymous viewer gets for one share token, resolved in a
/// single call to `GET /contracts/shared/{token}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedContractView {
    /// Restricted contract projection
    pub contract: ContractProjection,
    /// Analysis metadata, absent while analysis is pending
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisSummary>,
    /// Existing feedback comments, in backend order
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Response of `POST /contracts/{id}/share`: a URL embedding an opaque
/// share token, valid for seven days (lifetime is backend-owned)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareLink {
    /// Full shareable URL
    pub share_url: String,
    /// Expiry timestamp, if the backend reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}
