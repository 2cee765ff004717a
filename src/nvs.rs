//! Selection persistence backed by ESP-IDF NVS.

use esp_idf_svc::nvs::{EspDefaultNvsPartition, EspNvs, NvsDefault};
use esp_idf_svc::sys::EspError;
use inkbadge_ui::{SelectionState, StateStore};

const CURRENT_BADGE_KEY: &str = "current_badge";

pub struct NvsStateStore {
    nvs: EspNvs<NvsDefault>,
}

impl NvsStateStore {
    pub fn new(partition: EspDefaultNvsPartition, namespace: &str) -> Result<Self, EspError> {
        Ok(Self {
            nvs: EspNvs::new(partition, namespace, true)?,
        })
    }
}

impl StateStore for NvsStateStore {
    fn load(&mut self) -> Option<SelectionState> {
        match self.nvs.get_u32(CURRENT_BADGE_KEY) {
            Ok(Some(value)) => Some(SelectionState {
                current_badge: value,
            }),
            Ok(None) => None,
            Err(err) => {
                // Unreadable state is repaired by the catalog's clamp, not
                // surfaced to the wearer.
                log::warn!("selection state unreadable: {}", err);
                None
            }
        }
    }

    fn save(&mut self, state: &SelectionState) {
        if let Err(err) = self.nvs.set_u32(CURRENT_BADGE_KEY, state.current_badge) {
            log::warn!("failed to persist selection: {}", err);
        }
    }
}
