use dashmap::{DashMap, DashSet};

/// Area presence: area -> clients, client -> area.
///
/// A client stands in at most one area at a time.
#[derive(Default)]
pub struct Presence {
    area_to_clients: DashMap<usize, DashSet<u64>>,
    client_to_area: DashMap<u64, usize>,
}

impl Presence {
    pub fn new() -> Self {
        Self {
            area_to_clients: DashMap::new(),
            client_to_area: DashMap::new(),
        }
    }

    /// Move `client` into `area`, leaving its previous area if any.
    /// Returns the area it left.
    pub fn join(&self, area: usize, client: u64) -> Option<usize> {
        let previous = self.client_to_area.insert(client, area);
        if let Some(old) = previous.filter(|old| *old != area) {
            self.remove_from(old, client);
        }
        self.area_to_clients
            .entry(area)
            .or_insert_with(DashSet::new)
            .insert(client);
        previous
    }

    pub fn leave(&self, client: u64) -> Option<usize> {
        let (_, area) = self.client_to_area.remove(&client)?;
        self.remove_from(area, client);
        Some(area)
    }

    pub fn area_of(&self, client: u64) -> Option<usize> {
        self.client_to_area.get(&client).map(|a| *a.value())
    }

    /// Clients in `area`, ascending by id.
    pub fn clients_in(&self, area: usize) -> Vec<u64> {
        let mut ids: Vec<u64> = self
            .area_to_clients
            .get(&area)
            .map(|set| set.iter().map(|c| *c.key()).collect())
            .unwrap_or_default();
        ids.sort_unstable();
        ids
    }

    pub fn count_in(&self, area: usize) -> usize {
        self.area_to_clients.get(&area).map(|s| s.len()).unwrap_or(0)
    }

    fn remove_from(&self, area: usize, client: u64) {
        if let Some(set) = self.area_to_clients.get(&area) {
            set.remove(&client);
            if set.is_empty() {
                drop(set);
                self.area_to_clients.remove_if(&area, |_, s| s.is_empty());
            }
        }
    }
}
