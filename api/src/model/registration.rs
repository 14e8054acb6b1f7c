use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::EventId,
    registration::{CreateRegistration, Registration},
};
use serde::{Deserialize, Serialize};

/// 参加登録時に申告するユーザー情報
/// 保存済みのユーザーと一致しなければ登録は拒否される
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterToEventRequest {
    #[garde(length(min = 1))]
    pub username: String,
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(email)]
    pub email: String,
}

#[derive(new)]
pub struct RegisterToEventRequestWithId(EventId, RegisterToEventRequest);

impl From<RegisterToEventRequestWithId> for CreateRegistration {
    fn from(value: RegisterToEventRequestWithId) -> Self {
        let RegisterToEventRequestWithId(
            event_id,
            RegisterToEventRequest {
                username,
                name,
                email,
            },
        ) = value;
        CreateRegistration {
            username,
            name,
            email,
            event_id,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub username: String,
    pub event_id: EventId,
}

impl From<Registration> for RegistrationResponse {
    fn from(value: Registration) -> Self {
        let Registration { username, event_id } = value;
        Self { username, event_id }
    }
}
