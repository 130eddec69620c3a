#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Serotype1,
    Serotype2,
    Serotype3,
    Entero,
}

#[derive(Debug, Clone, Copy)]
pub struct CodeTable {
    pub kind: ChannelKind,
    pub entries: &'static [(i64, &'static str)],
}

const SEROTYPE1_CODES: &[(i64, &str)] = &[
    (1, "WPV1"),
    (2, "SL1"),
    (3, "WPV1+SL1"),
    (4, "VDPV1"),
    (5, "DISCORDANT"),
    (6, "ITD Pending"),
    (7, "Negative"),
    (8, "Under Process"),
    (9, "Not received in Lab"),
    (11, "aVDPV1"),
    (12, "iVDPV1"),
    (13, "cVDPV1"),
];

const SEROTYPE2_CODES: &[(i64, &str)] = &[
    (1, "WPV2"),
    (2, "SL2"),
    (3, "WPV2+SL2"),
    (4, "VDPV2"),
    (5, "DISCORDANT"),
    (6, "ITD Pending"),
    (7, "Negative"),
    (8, "Under Process"),
    (9, "Not received in Lab"),
    (11, "aVDPV2"),
    (12, "iVDPV2"),
    (13, "cVDPV2"),
];

const SEROTYPE3_CODES: &[(i64, &str)] = &[
    (1, "WPV3"),
    (2, "SL3"),
    (3, "WPV3+SL3"),
    (4, "VDPV3"),
    (5, "DISCORDANT"),
    (6, "ITD Pending"),
    (7, "Negative"),
    (8, "Under Process"),
    (9, "Not received in Lab"),
    (11, "aVDPV3"),
    (12, "iVDPV3"),
    (13, "cVDPV3"),
];

const ENTERO_CODES: &[(i64, &str)] = &[(1, "NPEV"), (7, "NVI"), (8, "Under Process")];

pub const SEROTYPE1: CodeTable = CodeTable {
    kind: ChannelKind::Serotype1,
    entries: SEROTYPE1_CODES,
};

pub const SEROTYPE2: CodeTable = CodeTable {
    kind: ChannelKind::Serotype2,
    entries: SEROTYPE2_CODES,
};

pub const SEROTYPE3: CodeTable = CodeTable {
    kind: ChannelKind::Serotype3,
    entries: SEROTYPE3_CODES,
};

pub const ENTERO: CodeTable = CodeTable {
    kind: ChannelKind::Entero,
    entries: ENTERO_CODES,
};

/// Entero code that forces the channel to "NPEV" when the two readings disagree.
pub const ENTERO_NPEV_CODE: i64 = 1;

pub fn serotype_tables() -> [&'static CodeTable; 3] {
    [&SEROTYPE1, &SEROTYPE2, &SEROTYPE3]
}
