//! Generated-style attribute and statistic tables.
//!
//! Each object type owns a dense table indexed by attribute id. The id
//! constants in [`attrs`] and [`stats`] are the public names callers use.

use lcp_types::ObjectType;

use crate::meta::{AttrMeta, EnumMeta, StatKind, StatMeta};
use crate::value::ValueKind as K;

pub mod enums {
    use super::EnumMeta;

    pub static OPER_STATUS: EnumMeta = EnumMeta {
        name: "OPER_STATUS",
        values: &[(0, "INACTIVE"), (1, "ACTIVE"), (2, "DISABLED")],
        deprecated: &[("UP", "ACTIVE"), ("DOWN", "INACTIVE")],
    };

    pub static ADMIN_STATE: EnumMeta = EnumMeta {
        name: "ADMIN_STATE",
        values: &[(0, "ENABLED"), (1, "DISABLED"), (2, "MAINT")],
        deprecated: &[("MAINTENANCE", "MAINT")],
    };

    pub static PORT_TYPE: EnumMeta = EnumMeta {
        name: "PORT_TYPE",
        values: &[
            (0, "INVALID"),
            (1, "CLIENT_IN"),
            (2, "CLIENT_OUT"),
            (3, "LINE_IN"),
            (4, "LINE_OUT"),
            (5, "OSC_IN"),
            (6, "OSC_OUT"),
        ],
        deprecated: &[],
    };

    pub static LOOPBACK_MODE: EnumMeta = EnumMeta {
        name: "LOOPBACK_MODE",
        values: &[(0, "NONE"), (1, "FACILITY"), (2, "TERMINAL")],
        deprecated: &[],
    };

    pub static FEC_MODE: EnumMeta = EnumMeta {
        name: "FEC_MODE",
        values: &[(0, "AUTO"), (1, "ENABLED"), (2, "DISABLED")],
        deprecated: &[("ON", "ENABLED"), ("OFF", "DISABLED")],
    };

    pub static AMP_MODE: EnumMeta = EnumMeta {
        name: "AMP_MODE",
        values: &[(0, "CONSTANT_GAIN"), (1, "CONSTANT_POWER")],
        deprecated: &[("AGC", "CONSTANT_GAIN"), ("APC", "CONSTANT_POWER")],
    };

    pub static APS_PATH: EnumMeta = EnumMeta {
        name: "APS_PATH",
        values: &[(0, "PRIMARY"), (1, "SECONDARY")],
        deprecated: &[],
    };

    pub static APS_PORT_TYPE: EnumMeta = EnumMeta {
        name: "APS_PORT_TYPE",
        values: &[
            (0, "LINE_PRIMARY_IN"),
            (1, "LINE_PRIMARY_OUT"),
            (2, "LINE_SECONDARY_IN"),
            (3, "LINE_SECONDARY_OUT"),
            (4, "COMMON_IN"),
            (5, "COMMON_OUT"),
        ],
        deprecated: &[],
    };
}

/// Attribute ids, one module per object type.
pub mod attrs {
    pub mod linecard {
        pub const HARDWARE_INFO: u32 = 0;
        pub const OPER_STATUS: u32 = 1;
        pub const ADMIN_STATE: u32 = 2;
        pub const SERIAL_NO: u32 = 3;
        pub const SOFTWARE_VERSION: u32 = 4;
        pub const TEMPERATURE: u32 = 5;
        pub const SLOT_COUNT: u32 = 6;
        pub const STATE_CHANGE_NOTIFY: u32 = 7;
        pub const OCM_SPECTRUM_POWER_NOTIFY: u32 = 8;
        pub const BOARD_MODE: u32 = 9;
    }

    pub mod port {
        pub const PORT_TYPE: u32 = 0;
        pub const PORT_ID: u32 = 1;
        pub const OPER_STATUS: u32 = 2;
        pub const ADMIN_STATE: u32 = 3;
        pub const LOS_THRESHOLD: u32 = 4;
        pub const INPUT_POWER: u32 = 5;
        pub const NAME: u32 = 6;
        pub const SUPPORTED_FEC_MODES: u32 = 7;
        pub const POWER_OFFSET: u32 = 8;
    }

    pub mod transceiver {
        pub const PORT_TYPE: u32 = 0;
        pub const PORT_ID: u32 = 1;
        pub const PRESENT: u32 = 2;
        pub const VENDOR: u32 = 3;
        pub const SERIAL_NO: u32 = 4;
        pub const ENABLED: u32 = 5;
        pub const LANE_COUNT: u32 = 6;
    }

    pub mod logical_channel {
        pub const CHANNEL_ID: u32 = 0;
        pub const ADMIN_STATE: u32 = 1;
        pub const DESCRIPTION: u32 = 2;
        pub const LOOPBACK_MODE: u32 = 3;
        pub const LINK_STATE: u32 = 4;
    }

    pub mod otn {
        pub const CHANNEL_ID: u32 = 0;
        pub const TTI_MSG_TRANSMIT: u32 = 1;
        pub const DELAY_MEASUREMENT_ENABLED: u32 = 2;
        pub const FEC_MODE: u32 = 3;
    }

    pub mod ethernet {
        pub const CHANNEL_ID: u32 = 0;
        pub const ALS_DELAY: u32 = 1;
        pub const MAINTENANCE: u32 = 2;
        pub const MAC_ADDRESS: u32 = 3;
    }

    pub mod physical_channel {
        pub const PORT_TYPE: u32 = 0;
        pub const PORT_ID: u32 = 1;
        pub const LANE_ID: u32 = 2;
        pub const TX_LASER: u32 = 3;
    }

    pub mod och {
        pub const PORT_TYPE: u32 = 0;
        pub const PORT_ID: u32 = 1;
        pub const FREQUENCY: u32 = 2;
        pub const TARGET_OUTPUT_POWER: u32 = 3;
        pub const OPERATIONAL_MODE: u32 = 4;
        pub const FREQUENCY_OFFSET: u32 = 5;
    }

    pub mod lldp {
        pub const CHANNEL_ID: u32 = 0;
        pub const ENABLED: u32 = 1;
        pub const NEIGHBOR_ID: u32 = 2;
    }

    pub mod assignment {
        pub const CHANNEL_ID: u32 = 0;
        pub const INDEX: u32 = 1;
        pub const LOGICAL_CHANNEL: u32 = 2;
        pub const OPTICAL_CHANNEL: u32 = 3;
        pub const ALLOCATION: u32 = 4;
    }

    pub mod interface {
        pub const INTERFACE_ID: u32 = 0;
        pub const ENABLED: u32 = 1;
        pub const IP_ADDRESS: u32 = 2;
    }

    pub mod oa {
        pub const ID: u32 = 0;
        pub const TARGET_GAIN: u32 = 1;
        pub const AMP_MODE: u32 = 2;
        pub const ENABLED: u32 = 3;
        pub const ACTUAL_GAIN: u32 = 4;
        pub const GAIN_RANGE: u32 = 5;
    }

    pub mod osc {
        pub const ID: u32 = 0;
        pub const ENABLED: u32 = 1;
        pub const OUTPUT_FREQUENCY: u32 = 2;
        pub const LOSS_HISTORY: u32 = 3;
    }

    pub mod aps {
        pub const ID: u32 = 0;
        pub const REVERTIVE: u32 = 1;
        pub const WAIT_TO_RESTORE: u32 = 2;
        pub const ACTIVE_PATH: u32 = 3;
    }

    pub mod aps_port {
        pub const PORT_TYPE: u32 = 0;
        pub const POWER_THRESHOLD: u32 = 1;
        pub const ENABLED: u32 = 2;
    }

    pub mod attenuator {
        pub const ID: u32 = 0;
        pub const TARGET_ATTENUATION: u32 = 1;
        pub const ENABLED: u32 = 2;
        pub const ATTENUATION_STEP: u32 = 3;
    }

    pub mod wss {
        pub const ID: u32 = 0;
        pub const MEDIA_CHANNELS: u32 = 1;
    }

    pub mod media_channel {
        pub const INDEX: u32 = 0;
        pub const LOWER_FREQUENCY: u32 = 1;
        pub const UPPER_FREQUENCY: u32 = 2;
        pub const ADMIN_STATE: u32 = 3;
    }

    pub mod ocm {
        pub const ID: u32 = 0;
        pub const SPECTRUM_POWER: u32 = 1;
        pub const FREQUENCY_GRANULARITY: u32 = 2;
    }

    pub mod otdr {
        pub const ID: u32 = 0;
        pub const REFRACTIVE_INDEX: u32 = 1;
        pub const BACKSCATTER_INDEX: u32 = 2;
        pub const SUPPORTED_PULSE_WIDTHS: u32 = 3;
        pub const SPAN_LOSSES: u32 = 4;
    }
}

/// Statistic ids, one module per object type that has statistics.
pub mod stats {
    pub mod linecard {
        pub const CPU_UTILIZATION: u32 = 0;
        pub const MEMORY_AVAILABLE: u32 = 1;
    }

    pub mod port {
        pub const INPUT_POWER_INSTANT: u32 = 0;
        pub const OUTPUT_POWER_INSTANT: u32 = 1;
    }

    pub mod otn {
        pub const PRE_FEC_BER: u32 = 0;
        pub const ERRORED_SECONDS: u32 = 1;
        pub const BACKGROUND_BLOCK_ERRORS: u32 = 2;
    }

    pub mod ethernet {
        pub const IN_PKTS: u32 = 0;
        pub const OUT_PKTS: u32 = 1;
        pub const IN_CRC_ERRORS: u32 = 2;
    }

    pub mod och {
        pub const INPUT_POWER: u32 = 0;
        pub const CHROMATIC_DISPERSION: u32 = 1;
    }

    pub mod oa {
        pub const INPUT_POWER: u32 = 0;
        pub const OUTPUT_POWER: u32 = 1;
        pub const ACTUAL_GAIN: u32 = 2;
    }

    pub mod osc {
        pub const INPUT_POWER: u32 = 0;
    }
}

use ObjectType as T;

const fn a(object_type: ObjectType, id: u32, name: &'static str, kind: K) -> AttrMeta {
    AttrMeta::new(object_type, id, name, kind)
}

const fn s(object_type: ObjectType, id: u32, name: &'static str, kind: StatKind) -> StatMeta {
    StatMeta {
        object_type,
        id,
        name,
        kind,
    }
}

static LINECARD: [AttrMeta; 10] = [
    a(T::Linecard, 0, "LINECARD_HARDWARE_INFO", K::Chars).create_only().default_value(""),
    a(T::Linecard, 1, "LINECARD_OPER_STATUS", K::Enum).with_enum(&enums::OPER_STATUS).read_only(),
    a(T::Linecard, 2, "LINECARD_ADMIN_STATE", K::Enum).with_enum(&enums::ADMIN_STATE).default_value("ENABLED"),
    a(T::Linecard, 3, "LINECARD_SERIAL_NO", K::Chars).read_only(),
    a(T::Linecard, 4, "LINECARD_SOFTWARE_VERSION", K::Chars).read_only(),
    a(T::Linecard, 5, "LINECARD_TEMPERATURE", K::F64).read_only(),
    a(T::Linecard, 6, "LINECARD_SLOT_COUNT", K::U16).read_only(),
    a(T::Linecard, 7, "LINECARD_STATE_CHANGE_NOTIFY", K::Pointer).default_value("ptr:0x0"),
    a(T::Linecard, 8, "LINECARD_OCM_SPECTRUM_POWER_NOTIFY", K::Pointer).default_value("ptr:0x0"),
    a(T::Linecard, 9, "LINECARD_BOARD_MODE", K::Chars),
];

static PORT: [AttrMeta; 9] = [
    a(T::Port, 0, "PORT_PORT_TYPE", K::Enum).with_enum(&enums::PORT_TYPE).create_only().mandatory(),
    a(T::Port, 1, "PORT_PORT_ID", K::U32).create_only().mandatory(),
    a(T::Port, 2, "PORT_OPER_STATUS", K::Enum).with_enum(&enums::OPER_STATUS).read_only(),
    a(T::Port, 3, "PORT_ADMIN_STATE", K::Enum).with_enum(&enums::ADMIN_STATE).default_value("ENABLED"),
    a(T::Port, 4, "PORT_LOS_THRESHOLD", K::F64),
    a(T::Port, 5, "PORT_INPUT_POWER", K::F64).read_only(),
    a(T::Port, 6, "PORT_NAME", K::Chars),
    a(T::Port, 7, "PORT_SUPPORTED_FEC_MODES", K::EnumList).with_enum(&enums::FEC_MODE).read_only(),
    a(T::Port, 8, "PORT_POWER_OFFSET", K::I8).default_value("0"),
];

static TRANSCEIVER: [AttrMeta; 7] = [
    a(T::Transceiver, 0, "TRANSCEIVER_PORT_TYPE", K::Enum).with_enum(&enums::PORT_TYPE).create_only().mandatory(),
    a(T::Transceiver, 1, "TRANSCEIVER_PORT_ID", K::U32).create_only().mandatory(),
    a(T::Transceiver, 2, "TRANSCEIVER_PRESENT", K::Bool).read_only(),
    a(T::Transceiver, 3, "TRANSCEIVER_VENDOR", K::Chars).read_only(),
    a(T::Transceiver, 4, "TRANSCEIVER_SERIAL_NO", K::Chars).read_only(),
    a(T::Transceiver, 5, "TRANSCEIVER_ENABLED", K::Bool).default_value("true"),
    a(T::Transceiver, 6, "TRANSCEIVER_LANE_COUNT", K::U8).read_only(),
];

static LOGICAL_CHANNEL: [AttrMeta; 5] = [
    a(T::LogicalChannel, 0, "LOGICALCHANNEL_CHANNEL_ID", K::U32).create_only().mandatory(),
    a(T::LogicalChannel, 1, "LOGICALCHANNEL_ADMIN_STATE", K::Enum).with_enum(&enums::ADMIN_STATE),
    a(T::LogicalChannel, 2, "LOGICALCHANNEL_DESCRIPTION", K::Chars),
    a(T::LogicalChannel, 3, "LOGICALCHANNEL_LOOPBACK_MODE", K::Enum).with_enum(&enums::LOOPBACK_MODE).default_value("NONE"),
    a(T::LogicalChannel, 4, "LOGICALCHANNEL_LINK_STATE", K::Enum).with_enum(&enums::OPER_STATUS).read_only(),
];

static OTN: [AttrMeta; 4] = [
    a(T::Otn, 0, "OTN_CHANNEL_ID", K::U32).create_only().mandatory(),
    a(T::Otn, 1, "OTN_TTI_MSG_TRANSMIT", K::Chars),
    a(T::Otn, 2, "OTN_DELAY_MEASUREMENT_ENABLED", K::Bool).default_value("false"),
    a(T::Otn, 3, "OTN_FEC_MODE", K::Enum).with_enum(&enums::FEC_MODE).default_value("AUTO"),
];

static ETHERNET: [AttrMeta; 4] = [
    a(T::Ethernet, 0, "ETHERNET_CHANNEL_ID", K::U32).create_only().mandatory(),
    a(T::Ethernet, 1, "ETHERNET_ALS_DELAY", K::U32),
    a(T::Ethernet, 2, "ETHERNET_MAINTENANCE", K::Bool),
    a(T::Ethernet, 3, "ETHERNET_MAC_ADDRESS", K::U8List).read_only(),
];

static PHYSICAL_CHANNEL: [AttrMeta; 4] = [
    a(T::PhysicalChannel, 0, "PHYSICALCHANNEL_PORT_TYPE", K::Enum).with_enum(&enums::PORT_TYPE).create_only().mandatory(),
    a(T::PhysicalChannel, 1, "PHYSICALCHANNEL_PORT_ID", K::U32).create_only().mandatory(),
    a(T::PhysicalChannel, 2, "PHYSICALCHANNEL_LANE_ID", K::U32).create_only().mandatory(),
    a(T::PhysicalChannel, 3, "PHYSICALCHANNEL_TX_LASER", K::Bool),
];

static OCH: [AttrMeta; 6] = [
    a(T::Och, 0, "OCH_PORT_TYPE", K::Enum).with_enum(&enums::PORT_TYPE).create_only().mandatory(),
    a(T::Och, 1, "OCH_PORT_ID", K::U32).create_only().mandatory(),
    a(T::Och, 2, "OCH_FREQUENCY", K::U64),
    a(T::Och, 3, "OCH_TARGET_OUTPUT_POWER", K::F64),
    a(T::Och, 4, "OCH_OPERATIONAL_MODE", K::U32),
    a(T::Och, 5, "OCH_FREQUENCY_OFFSET", K::I64).read_only(),
];

static LLDP: [AttrMeta; 3] = [
    a(T::Lldp, 0, "LLDP_CHANNEL_ID", K::U32).create_only().mandatory(),
    a(T::Lldp, 1, "LLDP_ENABLED", K::Bool).default_value("false"),
    a(T::Lldp, 2, "LLDP_NEIGHBOR_ID", K::Chars).read_only(),
];

static ASSIGNMENT: [AttrMeta; 5] = [
    a(T::Assignment, 0, "ASSIGNMENT_CHANNEL_ID", K::U32).create_only().mandatory(),
    a(T::Assignment, 1, "ASSIGNMENT_INDEX", K::U32).create_only().mandatory(),
    a(T::Assignment, 2, "ASSIGNMENT_LOGICAL_CHANNEL", K::ObjectId),
    a(T::Assignment, 3, "ASSIGNMENT_OPTICAL_CHANNEL", K::ObjectId),
    a(T::Assignment, 4, "ASSIGNMENT_ALLOCATION", K::F64),
];

static INTERFACE: [AttrMeta; 3] = [
    a(T::Interface, 0, "INTERFACE_INTERFACE_ID", K::U32).create_only().mandatory(),
    a(T::Interface, 1, "INTERFACE_ENABLED", K::Bool).default_value("true"),
    a(T::Interface, 2, "INTERFACE_IP_ADDRESS", K::Chars),
];

static OA: [AttrMeta; 6] = [
    a(T::Oa, 0, "OA_ID", K::U32).create_only().mandatory(),
    a(T::Oa, 1, "OA_TARGET_GAIN", K::F64),
    a(T::Oa, 2, "OA_AMP_MODE", K::Enum).with_enum(&enums::AMP_MODE).default_value("CONSTANT_GAIN"),
    a(T::Oa, 3, "OA_ENABLED", K::Bool).default_value("true"),
    a(T::Oa, 4, "OA_ACTUAL_GAIN", K::F64).read_only(),
    a(T::Oa, 5, "OA_GAIN_RANGE", K::U32Range),
];

static OSC: [AttrMeta; 4] = [
    a(T::Osc, 0, "OSC_ID", K::U32).create_only().mandatory(),
    a(T::Osc, 1, "OSC_ENABLED", K::Bool).default_value("true"),
    a(T::Osc, 2, "OSC_OUTPUT_FREQUENCY", K::U64).read_only(),
    a(T::Osc, 3, "OSC_LOSS_HISTORY", K::I32List).read_only(),
];

static APS: [AttrMeta; 4] = [
    a(T::Aps, 0, "APS_ID", K::U32).create_only().mandatory(),
    a(T::Aps, 1, "APS_REVERTIVE", K::Bool).default_value("false"),
    a(T::Aps, 2, "APS_WAIT_TO_RESTORE", K::U32),
    a(T::Aps, 3, "APS_ACTIVE_PATH", K::Enum).with_enum(&enums::APS_PATH).read_only(),
];

static APS_PORT: [AttrMeta; 3] = [
    a(T::ApsPort, 0, "APSPORT_PORT_TYPE", K::Enum).with_enum(&enums::APS_PORT_TYPE).create_only().mandatory(),
    a(T::ApsPort, 1, "APSPORT_POWER_THRESHOLD", K::F64),
    a(T::ApsPort, 2, "APSPORT_ENABLED", K::Bool),
];

static ATTENUATOR: [AttrMeta; 4] = [
    a(T::Attenuator, 0, "ATTENUATOR_ID", K::U32).create_only().mandatory(),
    a(T::Attenuator, 1, "ATTENUATOR_TARGET_ATTENUATION", K::F64),
    a(T::Attenuator, 2, "ATTENUATOR_ENABLED", K::Bool),
    a(T::Attenuator, 3, "ATTENUATOR_ATTENUATION_STEP", K::I16),
];

static WSS: [AttrMeta; 2] = [
    a(T::Wss, 0, "WSS_ID", K::U32).create_only().mandatory(),
    a(T::Wss, 1, "WSS_MEDIA_CHANNELS", K::ObjectList).read_only(),
];

static MEDIA_CHANNEL: [AttrMeta; 4] = [
    a(T::MediaChannel, 0, "MEDIACHANNEL_INDEX", K::U32).create_only().mandatory(),
    a(T::MediaChannel, 1, "MEDIACHANNEL_LOWER_FREQUENCY", K::U64),
    a(T::MediaChannel, 2, "MEDIACHANNEL_UPPER_FREQUENCY", K::U64),
    a(T::MediaChannel, 3, "MEDIACHANNEL_ADMIN_STATE", K::Enum).with_enum(&enums::ADMIN_STATE),
];

static OCM: [AttrMeta; 3] = [
    a(T::Ocm, 0, "OCM_ID", K::U32).create_only().mandatory(),
    a(T::Ocm, 1, "OCM_SPECTRUM_POWER", K::SpectrumList).read_only(),
    a(T::Ocm, 2, "OCM_FREQUENCY_GRANULARITY", K::U64),
];

static OTDR: [AttrMeta; 5] = [
    a(T::Otdr, 0, "OTDR_ID", K::U32).create_only().mandatory(),
    a(T::Otdr, 1, "OTDR_REFRACTIVE_INDEX", K::F64),
    a(T::Otdr, 2, "OTDR_BACKSCATTER_INDEX", K::F64),
    a(T::Otdr, 3, "OTDR_SUPPORTED_PULSE_WIDTHS", K::U32List).read_only(),
    a(T::Otdr, 4, "OTDR_SPAN_LOSSES", K::F64List).read_only(),
];

static LINECARD_STATS: [StatMeta; 2] = [
    s(T::Linecard, 0, "LINECARD_CPU_UTILIZATION", StatKind::F64),
    s(T::Linecard, 1, "LINECARD_MEMORY_AVAILABLE", StatKind::U64),
];

static PORT_STATS: [StatMeta; 2] = [
    s(T::Port, 0, "PORT_INPUT_POWER_INSTANT", StatKind::F64),
    s(T::Port, 1, "PORT_OUTPUT_POWER_INSTANT", StatKind::F64),
];

static OTN_STATS: [StatMeta; 3] = [
    s(T::Otn, 0, "OTN_PRE_FEC_BER", StatKind::F64),
    s(T::Otn, 1, "OTN_ERRORED_SECONDS", StatKind::U64),
    s(T::Otn, 2, "OTN_BACKGROUND_BLOCK_ERRORS", StatKind::U64),
];

static ETHERNET_STATS: [StatMeta; 3] = [
    s(T::Ethernet, 0, "ETHERNET_IN_PKTS", StatKind::U64),
    s(T::Ethernet, 1, "ETHERNET_OUT_PKTS", StatKind::U64),
    s(T::Ethernet, 2, "ETHERNET_IN_CRC_ERRORS", StatKind::U64),
];

static OCH_STATS: [StatMeta; 2] = [
    s(T::Och, 0, "OCH_INPUT_POWER", StatKind::F64),
    s(T::Och, 1, "OCH_CHROMATIC_DISPERSION", StatKind::F64),
];

static OA_STATS: [StatMeta; 3] = [
    s(T::Oa, 0, "OA_INPUT_POWER", StatKind::F64),
    s(T::Oa, 1, "OA_OUTPUT_POWER", StatKind::F64),
    s(T::Oa, 2, "OA_ACTUAL_GAIN", StatKind::F64),
];

static OSC_STATS: [StatMeta; 1] = [s(T::Osc, 0, "OSC_INPUT_POWER", StatKind::F64)];

pub(crate) fn attribute_table(object_type: ObjectType) -> Option<&'static [AttrMeta]> {
    let table: &'static [AttrMeta] = match object_type {
        T::Null => return None,
        T::Linecard => &LINECARD,
        T::Port => &PORT,
        T::Transceiver => &TRANSCEIVER,
        T::LogicalChannel => &LOGICAL_CHANNEL,
        T::Otn => &OTN,
        T::Ethernet => &ETHERNET,
        T::PhysicalChannel => &PHYSICAL_CHANNEL,
        T::Och => &OCH,
        T::Lldp => &LLDP,
        T::Assignment => &ASSIGNMENT,
        T::Interface => &INTERFACE,
        T::Oa => &OA,
        T::Osc => &OSC,
        T::Aps => &APS,
        T::ApsPort => &APS_PORT,
        T::Attenuator => &ATTENUATOR,
        T::Wss => &WSS,
        T::MediaChannel => &MEDIA_CHANNEL,
        T::Ocm => &OCM,
        T::Otdr => &OTDR,
    };
    Some(table)
}

pub(crate) fn stat_table(object_type: ObjectType) -> &'static [StatMeta] {
    match object_type {
        T::Linecard => &LINECARD_STATS,
        T::Port => &PORT_STATS,
        T::Otn => &OTN_STATS,
        T::Ethernet => &ETHERNET_STATS,
        T::Och => &OCH_STATS,
        T::Oa => &OA_STATS,
        T::Osc => &OSC_STATS,
        _ => &[],
    }
}
