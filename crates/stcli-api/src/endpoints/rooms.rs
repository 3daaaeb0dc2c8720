// Room endpoints. All room operations are location-scoped.

use serde_json::Value;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{ItemsList, Room};

impl ApiClient {
    /// List rooms in a location.
    ///
    /// `GET /v1/locations/{locationId}/rooms`
    pub async fn list_rooms(&self, location_id: &str) -> Result<Vec<Room>, Error> {
        let list: ItemsList<Room> = self
            .get(&format!("locations/{location_id}/rooms"))
            .await?;
        Ok(list.items)
    }

    /// Get a single room.
    ///
    /// `GET /v1/locations/{locationId}/rooms/{roomId}`
    pub async fn get_room(&self, location_id: &str, room_id: &str) -> Result<Room, Error> {
        self.get(&format!("locations/{location_id}/rooms/{room_id}"))
            .await
    }

    /// Create a room.
    ///
    /// `POST /v1/locations/{locationId}/rooms`
    pub async fn create_room(&self, location_id: &str, room: &Value) -> Result<Room, Error> {
        self.post(&format!("locations/{location_id}/rooms"), room)
            .await
    }

    /// Update a room.
    ///
    /// `PUT /v1/locations/{locationId}/rooms/{roomId}`
    pub async fn update_room(
        &self,
        location_id: &str,
        room_id: &str,
        room: &Value,
    ) -> Result<Room, Error> {
        self.put(&format!("locations/{location_id}/rooms/{room_id}"), room)
            .await
    }

    /// Delete a room.
    ///
    /// `DELETE /v1/locations/{locationId}/rooms/{roomId}`
    pub async fn delete_room(&self, location_id: &str, room_id: &str) -> Result<(), Error> {
        self.delete(&format!("locations/{location_id}/rooms/{room_id}"))
            .await
    }
}
