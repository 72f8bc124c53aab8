//! RisingWave targets

use dbtlink_core::{Credentials, CredentialsError, WarehouseType};
use crate::schema::TargetSchema;
use crate::store::RawTarget;
use super::postgres::{wire_protocol_credentials, WIRE_PROTOCOL_FIELDS};

pub static SCHEMA: TargetSchema = TargetSchema {
    warehouse: WarehouseType::RisingWave,
    fields: WIRE_PROTOCOL_FIELDS,
};

pub fn normalize(target: &RawTarget) -> Result<Credentials, CredentialsError> {
    wire_protocol_credentials(WarehouseType::RisingWave, target).map(Credentials::RisingWave)
}
