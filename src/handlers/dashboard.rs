/// Dashboard handler
///
/// Owns the latest snapshot, the wallet session and the service clients, and
/// turns them into a `DashboardView` on every refresh. The previous caller rank
/// lives here so rank changes can be reported; the ranking functions themselves
/// stay stateless.

use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, instrument, warn};

use crate::client::{MintReceipt, MintService, OracleService, PassportSource, ScoreReport};
use crate::core::error::ServiceError;
use crate::core::ranking::{caller_summary, compute_caller_rank, compute_leaderboard, find_caller_passport, top_entries};
use crate::core::types::{CallerSummary, LeaderboardEntry, PassportRecord, PassportSnapshot};
use crate::util::display::print_dashboard;
use crate::util::format::{display_token_id, token_id_hex_prefix, truncate_address};
use crate::wallet::{KeyValueStore, WalletSession};

/// Passport panel states, in the order they are checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassportPanel {
    Disconnected,
    Error(String),
    Loading,
    Missing,
    Card(PassportCard),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassportCard {
    pub token_hex: String,
    pub short_id: String,
    pub owner_display: String,
    pub chain: String,
    pub score: i64,
    pub achievements: Vec<String>,
}

impl PassportCard {
    pub fn from_record(record: &PassportRecord) -> Self {
        Self {
            token_hex: token_id_hex_prefix(record.token_id.as_ref()),
            short_id: display_token_id(record.token_id.as_ref()),
            owner_display: truncate_address(&record.owner, 10, 8),
            chain: record.owner_chain.clone(),
            score: record.effective_score(),
            achievements: record.achievements().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub wallet: Option<String>,
    pub passport: PassportPanel,
    /// Visible top of the board
    pub leaderboard: Vec<LeaderboardEntry>,
    pub ranked_total: usize,
    /// "Your Place"; one past the board when the wallet is unranked or absent
    pub your_place: usize,
    pub caller: Option<CallerSummary>,
    pub refreshed_at: Option<DateTime<Utc>>,
}

/// Derive everything the dashboard shows from one snapshot
pub fn build_view(
    snapshot: Option<&PassportSnapshot>,
    wallet: Option<&str>,
    board_size: usize,
    last_error: Option<&str>,
) -> DashboardView {
    let records: &[PassportRecord] = snapshot.map(|s| s.records.as_slice()).unwrap_or(&[]);
    let board = compute_leaderboard(records);

    let passport = match (wallet, last_error, snapshot) {
        (None, _, _) => PassportPanel::Disconnected,
        (Some(_), Some(err), _) => PassportPanel::Error(err.to_string()),
        (Some(_), None, None) => PassportPanel::Loading,
        (Some(addr), None, Some(_)) => match find_caller_passport(records, addr) {
            Some(record) => PassportPanel::Card(PassportCard::from_record(record)),
            None => PassportPanel::Missing,
        },
    };

    DashboardView {
        wallet: wallet.map(str::to_string),
        passport,
        your_place: wallet.map_or(board.len() + 1, |addr| compute_caller_rank(&board, addr)),
        caller: wallet.map(|addr| caller_summary(records, &board, addr)),
        ranked_total: board.len(),
        leaderboard: top_entries(&board, board_size).to_vec(),
        refreshed_at: snapshot.map(|s| s.fetched_at),
    }
}

#[derive(Debug, Clone)]
pub struct DashboardSettings {
    pub board_size: usize,
    pub poll_interval: Duration,
    pub refresh_delay: Duration,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            board_size: 5,
            poll_interval: Duration::from_secs(5),
            refresh_delay: Duration::from_millis(2000),
        }
    }
}

pub struct Dashboard<P, M, O, S>
where
    P: PassportSource,
    M: MintService,
    O: OracleService,
    S: KeyValueStore,
{
    source: P,
    mint: M,
    oracle: O,
    session: WalletSession<S>,
    settings: DashboardSettings,
    snapshot: Option<PassportSnapshot>,
    last_error: Option<String>,
    last_caller_rank: Option<usize>,
}

impl<P, M, O, S> Dashboard<P, M, O, S>
where
    P: PassportSource,
    M: MintService,
    O: OracleService,
    S: KeyValueStore,
{
    pub fn new(source: P, mint: M, oracle: O, session: WalletSession<S>, settings: DashboardSettings) -> Self {
        Self {
            source,
            mint,
            oracle,
            session,
            settings,
            snapshot: None,
            last_error: None,
            last_caller_rank: None,
        }
    }

    pub fn session(&self) -> &WalletSession<S> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut WalletSession<S> {
        &mut self.session
    }

    pub fn view(&self) -> DashboardView {
        build_view(
            self.snapshot.as_ref(),
            self.session.address(),
            self.settings.board_size,
            self.last_error.as_deref(),
        )
    }

    /// Pull a fresh snapshot. A failed fetch keeps the previous one.
    #[instrument(skip(self))]
    pub async fn refresh(&mut self) -> DashboardView {
        match self.source.fetch_snapshot().await {
            Ok(snapshot) => {
                debug!(count = snapshot.records.len(), "Snapshot refreshed");
                self.snapshot = Some(snapshot);
                self.last_error = None;
            }
            Err(e) => {
                warn!(error = %e, "⚠️ Snapshot refresh failed - keeping last snapshot");
                self.last_error = Some(e.to_string());
            }
        }

        let view = self.view();
        self.track_rank(&view);
        view
    }

    fn track_rank(&mut self, view: &DashboardView) {
        let Some(caller) = view.caller else {
            self.last_caller_rank = None;
            return;
        };

        if let Some(previous) = self.last_caller_rank {
            if previous != caller.rank {
                info!(from = previous, to = caller.rank, score = caller.score, "📈 Leaderboard place changed");
            }
        }
        self.last_caller_rank = Some(caller.rank);
    }

    fn owner(&self) -> Result<String, ServiceError> {
        self.session
            .address()
            .map(str::to_string)
            .ok_or(ServiceError::MissingOwner)
    }

    /// Mint for the connected wallet, then refresh after the settle delay
    pub async fn mint_passport(&mut self) -> Result<MintReceipt, ServiceError> {
        let owner = self.owner()?;
        let receipt = self.mint.mint(&owner).await?;
        info!("Passport minted! Refreshing...");

        tokio::time::sleep(self.settings.refresh_delay).await;
        self.refresh().await;
        Ok(receipt)
    }

    /// Ask the oracle to re-score the connected wallet, then refresh
    pub async fn request_score(&mut self) -> Result<ScoreReport, ServiceError> {
        let owner = self.owner()?;
        let report = self.oracle.request_score(&owner).await?;

        tokio::time::sleep(self.settings.refresh_delay).await;
        self.refresh().await;
        Ok(report)
    }

    /// Poll and redraw until a shutdown signal arrives
    pub async fn run(&mut self, mut shutdown: broadcast::Receiver<()>) -> Result<()> {
        let mut ticker = interval(self.settings.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            poll_secs = self.settings.poll_interval.as_secs(),
            board_size = self.settings.board_size,
            "🎯 Dashboard polling started"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let view = self.refresh().await;
                    print_dashboard(&view);
                }
                _ = shutdown.recv() => {
                    info!("🛑 Dashboard shutting down gracefully");
                    return Ok(());
                }
            }
        }
    }
}
