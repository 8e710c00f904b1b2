use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use aoprism_core::protocol::{Candidate, PoseState};
use dashmap::DashMap;
use tokio::sync::mpsc;

/// One client's outbound queue sender (wire strings, terminator included).
#[derive(Clone)]
pub struct Connection {
    pub tx: mpsc::Sender<String>,
}

/// Registry record for one connected client.
///
/// Written only by the owning session task; other sessions read it when they
/// build pairing snapshots. The pose is swapped as a whole `Arc`.
#[derive(Clone)]
pub struct ClientEntry {
    pub conn: Connection,
    /// Selected character, `-1` while spectating.
    pub char_id: i64,
    pub pose: Arc<PoseState>,
}

/// Session registry: `client_id -> ClientEntry`.
#[derive(Default)]
pub struct SessionRegistry {
    clients: DashMap<u64, ClientEntry>,
    next_id: AtomicU64,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            clients: DashMap::new(),
            next_id: AtomicU64::new(0),
        }
    }

    /// Ids are never reused within a process.
    pub fn allocate_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    pub fn insert(&self, client_id: u64, conn: Connection) {
        self.clients.insert(
            client_id,
            ClientEntry {
                conn,
                char_id: -1,
                pose: Arc::new(PoseState::default()),
            },
        );
    }

    pub fn remove(&self, client_id: u64) -> Option<ClientEntry> {
        self.clients.remove(&client_id).map(|(_, e)| e)
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    pub fn connection(&self, client_id: u64) -> Option<Connection> {
        self.clients.get(&client_id).map(|e| e.value().conn.clone())
    }

    pub fn char_id(&self, client_id: u64) -> Option<i64> {
        self.clients.get(&client_id).map(|e| e.value().char_id)
    }

    pub fn pose(&self, client_id: u64) -> Option<Arc<PoseState>> {
        self.clients.get(&client_id).map(|e| Arc::clone(&e.value().pose))
    }

    /// Switch character and reset the published pose.
    pub fn set_character(&self, client_id: u64, char_id: i64, pose: PoseState) {
        if let Some(mut e) = self.clients.get_mut(&client_id) {
            e.char_id = char_id;
            e.pose = Arc::new(pose);
        }
    }

    /// Replace the published pose wholesale.
    pub fn publish_pose(&self, client_id: u64, pose: Arc<PoseState>) {
        if let Some(mut e) = self.clients.get_mut(&client_id) {
            e.pose = pose;
        }
    }

    /// Whether any of `ids` other than `except` holds `char_id`.
    pub fn char_taken(&self, ids: &[u64], char_id: i64, except: u64) -> bool {
        ids.iter()
            .filter(|id| **id != except)
            .any(|id| self.char_id(*id) == Some(char_id))
    }

    /// Point-in-time pairing snapshot of `ids` (kept in the given order),
    /// skipping `except` and clients that have disconnected meanwhile.
    pub fn candidates(&self, ids: &[u64], except: u64) -> Vec<Candidate> {
        ids.iter()
            .filter(|id| **id != except)
            .filter_map(|id| {
                self.clients.get(id).map(|e| Candidate {
                    client_id: *id,
                    char_id: e.value().char_id,
                    pose: Arc::clone(&e.value().pose),
                })
            })
            .collect()
    }
}
