//! End-of-session summary and share text

use ew_core::{Chips, CoreResult};
use ew_slot_lab::GameState;
use serde::{Deserialize, Serialize};

use crate::loss::{counts, total_loss};

/// Snapshot of how a session ended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub total_loss: Chips,
    pub total_spins: usize,
    pub wins: usize,
    pub near_misses: usize,
    pub initial_balance: Chips,
    pub final_balance: Chips,
}

impl SessionSummary {
    pub fn from_state(state: &GameState) -> Self {
        let history = state.history();
        let c = counts(history);
        Self {
            total_loss: total_loss(history),
            total_spins: c.total,
            wins: c.wins,
            near_misses: c.near_misses,
            initial_balance: state.initial_balance(),
            final_balance: state.balance(),
        }
    }

    /// JSON export for a result screen or share backend
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Multi-line report shown when the session ends
    pub fn report(&self) -> String {
        let mut out = String::new();
        out.push_str("⚠️ SESSION SUMMARY\n");
        out.push_str(&format!("Total loss:     {}\n", self.total_loss));
        out.push_str(&format!("Total spins:    {}\n", self.total_spins));
        out.push_str(&format!(
            "Wins / near misses: {} / {}\n",
            self.wins, self.near_misses
        ));
        out.push_str(&format!(
            "Balance:        {} → {}\n",
            self.initial_balance, self.final_balance
        ));
        out.push('\n');
        out.push_str(
            "The house edge and small manipulations add up to a long-run loss.\n\
             Near misses make you feel you almost won and push you to keep playing.\n\
             Occasional wins do not change the fact that the system is built to favor the house.\n",
        );
        out
    }

    /// Shareable awareness poster
    pub fn share_poster(&self) -> String {
        format!(
            "🚫 I FINISHED THE ANTI-GAMBLING SIMULATION!\n\
             \n\
             Total loss: {}\n\
             Total spins: {}\n\
             \n\
             Conclusion: gambling ALWAYS loses in the long run!\n\
             \n\
             Stay alert to the dangers of gambling and addiction.\n\
             \n\
             #AntiGambling #GamblingAwareness #SDG3 #SDG4",
            self.total_loss, self.total_spins
        )
    }
}
