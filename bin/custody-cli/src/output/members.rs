//! Role registry and token holder formatting implementations

use custody_primitives::Address;
use custody_stf::queries::MembersView;
use serde::Serialize;

use super::{
    helpers::{full_hex, porcelain_field, porcelain_optional},
    traits::Formattable,
};

#[derive(Serialize)]
pub(crate) struct MembersInfo {
    #[serde(flatten)]
    pub(crate) members: MembersView,
    pub(crate) total_supply: u64,
}

impl Formattable for MembersInfo {
    fn format_porcelain(&self) -> String {
        let m = &self.members;
        let mut output = vec![
            porcelain_field("members.owner", full_hex(&m.owner)),
            porcelain_optional("members.custodian", m.custodian.as_ref().map(full_hex)),
            porcelain_field("members.broker_count", m.brokers.len()),
        ];
        for (i, broker) in m.brokers.iter().enumerate() {
            output.push(porcelain_field(&format!("members.brokers.{i}"), full_hex(broker)));
        }
        output.extend([
            porcelain_field("members.controller", full_hex(&m.controller)),
            porcelain_field("members.bridge", full_hex(&m.bridge)),
            porcelain_field("members.token", full_hex(&m.token)),
            porcelain_field("members.paused", m.paused),
            porcelain_field("members.total_supply", self.total_supply),
        ]);
        output.join("\n")
    }
}

#[derive(Serialize)]
pub(crate) struct BalanceInfo {
    pub(crate) holder: Address,
    pub(crate) balance: u64,
}

impl Formattable for BalanceInfo {
    fn format_porcelain(&self) -> String {
        [
            porcelain_field("balance.holder", full_hex(&self.holder)),
            porcelain_field("balance.amount", self.balance),
        ]
        .join("\n")
    }
}

#[derive(Serialize)]
pub(crate) struct DepositAddressesInfo {
    pub(crate) broker: Address,
    pub(crate) is_broker: bool,
    pub(crate) custodian_deposit_address: Option<String>,
    pub(crate) broker_deposit_address: Option<String>,
}

impl Formattable for DepositAddressesInfo {
    fn format_porcelain(&self) -> String {
        [
            porcelain_field("deposit_addresses.broker", full_hex(&self.broker)),
            porcelain_field("deposit_addresses.is_broker", self.is_broker),
            porcelain_optional(
                "deposit_addresses.custodian",
                self.custodian_deposit_address.as_deref(),
            ),
            porcelain_optional(
                "deposit_addresses.broker",
                self.broker_deposit_address.as_deref(),
            ),
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cli::OutputFormat, output::render};

    fn members(custodian: Option<Address>) -> MembersInfo {
        MembersInfo {
            members: MembersView {
                owner: Address::repeat_byte(1),
                custodian,
                brokers: vec![Address::repeat_byte(0x10), Address::repeat_byte(0x11)],
                controller: Address::repeat_byte(2),
                bridge: Address::repeat_byte(3),
                token: Address::repeat_byte(4),
                paused: false,
            },
            total_supply: 42,
        }
    }

    #[test]
    fn test_members_porcelain() {
        let out = members(None).format_porcelain();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], format!("members.owner: {}", "01".repeat(20)));
        assert_eq!(lines[1], "members.custodian: none");
        assert_eq!(lines[2], "members.broker_count: 2");
        assert_eq!(lines[4], format!("members.brokers.1: {}", "11".repeat(20)));
        assert_eq!(lines.last(), Some(&"members.total_supply: 42"));
    }

    #[test]
    fn test_members_json_is_flat() {
        let json = render(&members(Some(Address::repeat_byte(5))), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_supply"], 42);
        assert_eq!(value["paused"], false);
        assert!(value["custodian"].is_string());
    }

    #[test]
    fn test_deposit_addresses_porcelain() {
        let info = DepositAddressesInfo {
            broker: Address::repeat_byte(0x10),
            is_broker: true,
            custodian_deposit_address: Some("bc1qcustodian".to_owned()),
            broker_deposit_address: None,
        };
        let out = info.format_porcelain();
        assert!(out.contains("deposit_addresses.is_broker: true"));
        assert!(out.contains("deposit_addresses.custodian: bc1qcustodian"));
        assert!(out.ends_with("deposit_addresses.broker: none"));
    }
}
