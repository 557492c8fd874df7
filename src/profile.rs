//! Persona collected during onboarding
//!
//! Only the persona is written to disk. Photos and generated images stay in
//! memory for the lifetime of a session.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::HomesCanvasConfig;

/// Most moods a persona may pick
pub const MAX_MOODS: usize = 3;

/// Won per budget unit
pub const BUDGET_UNIT_WON: u64 = 10_000;

#[derive(Debug, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseError {
    kind: &'static str,
    value: String,
}

/// Interior taste
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Minimal,
    Modern,
    Wood,
    Vintage,
    Nordic,
    Cozy,
    Industrial,
    Natural,
}

impl Mood {
    pub const ALL: [Mood; 8] = [
        Mood::Minimal,
        Mood::Modern,
        Mood::Wood,
        Mood::Vintage,
        Mood::Nordic,
        Mood::Cozy,
        Mood::Industrial,
        Mood::Natural,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Mood::Minimal => "minimal",
            Mood::Modern => "modern",
            Mood::Wood => "wood",
            Mood::Vintage => "vintage",
            Mood::Nordic => "nordic",
            Mood::Cozy => "cozy",
            Mood::Industrial => "industrial",
            Mood::Natural => "natural",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Mood {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|m| m.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseError {
                kind: "mood",
                value: s.to_string(),
            })
    }
}

/// Tenure of the home being furnished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResidenceType {
    /// Monthly rent (wolse); walls must stay intact
    Monthly,
    /// Lump-sum lease (jeonse)
    Yearly,
    Own,
}

impl ResidenceType {
    pub fn id(self) -> &'static str {
        match self {
            ResidenceType::Monthly => "monthly",
            ResidenceType::Yearly => "yearly",
            ResidenceType::Own => "own",
        }
    }
}

impl fmt::Display for ResidenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ResidenceType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" | "wolse" => Ok(ResidenceType::Monthly),
            "yearly" | "jeonse" => Ok(ResidenceType::Yearly),
            "own" | "owner" => Ok(ResidenceType::Own),
            _ => Err(ParseError {
                kind: "residence type",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserProfile {
    pub nickname: String,
    pub moods: Vec<Mood>,
    pub residence_type: Option<ResidenceType>,
    /// In units of 10,000 KRW
    pub budget: u32,
    pub move_in_date: Option<NaiveDate>,
}

impl UserProfile {
    /// Add or remove a mood. Adding past [`MAX_MOODS`] is refused.
    /// Returns whether the selection changed.
    pub fn toggle_mood(&mut self, mood: Mood) -> bool {
        if let Some(pos) = self.moods.iter().position(|m| *m == mood) {
            self.moods.remove(pos);
            return true;
        }
        if self.moods.len() >= MAX_MOODS {
            log::debug!("Mood {} ignored, {} already picked", mood, MAX_MOODS);
            return false;
        }
        self.moods.push(mood);
        true
    }

    pub fn budget_won(&self) -> u64 {
        u64::from(self.budget) * BUDGET_UNIT_WON
    }

    /// Whether onboarding collected enough to recommend furniture
    pub fn is_complete(&self) -> bool {
        !self.nickname.trim().is_empty() && self.residence_type.is_some() && self.budget > 0
    }
}

/// JSON file holding the persona
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    /// Store in the user data directory
    pub fn open_default() -> Option<Self> {
        dirs::data_dir().map(|dir| Self::at(dir.join(HomesCanvasConfig::ID).join("profile.json")))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the profile, falling back to an empty one
    pub fn load(&self) -> UserProfile {
        if !self.path.exists() {
            return UserProfile::default();
        }
        match self.try_load() {
            Ok(profile) => profile,
            Err(err) => {
                log::warn!("Failed to load profile from {}: {:#}", self.path.display(), err);
                UserProfile::default()
            }
        }
    }

    pub fn try_load(&self) -> anyhow::Result<UserProfile> {
        let data = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let mut profile: UserProfile =
            serde_json::from_str(&data).context("Failed to parse profile")?;
        let mut seen = HashSet::new();
        profile.moods.retain(|m| seen.insert(*m));
        profile.moods.truncate(MAX_MOODS);
        Ok(profile)
    }

    pub fn save(&self, profile: &UserProfile) -> anyhow::Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let data = serde_json::to_string_pretty(profile)?;
        std::fs::write(&self.path, data)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        log::debug!("Profile saved to {}", self.path.display());
        Ok(())
    }
}
