use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::services::api::AppointmentsApi;
use crate::services::appointments_store::{AppointmentsState, AppointmentsStore};
use crate::services::availability_store::{AvailabilityState, AvailabilityStore};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RootStoreSnapshot {
    #[serde(default)]
    pub appointments: AppointmentsState,
    #[serde(default)]
    pub availability: AvailabilityState,
}

pub struct RootStore {
    pub appointments: AppointmentsStore,
    pub availability: AvailabilityStore,
}

impl RootStore {
    pub fn new(api: Arc<dyn AppointmentsApi>) -> Self {
        Self {
            appointments: AppointmentsStore::new(api.clone()),
            availability: AvailabilityStore::new(api),
        }
    }

    pub fn snapshot(&self) -> RootStoreSnapshot {
        RootStoreSnapshot {
            appointments: self.appointments.snapshot(),
            availability: self.availability.snapshot(),
        }
    }

    pub fn hydrate(&self, snapshot: RootStoreSnapshot) {
        self.appointments.hydrate(snapshot.appointments);
        self.availability.hydrate(snapshot.availability);
    }
}
