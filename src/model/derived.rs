use crate::pipeline::stage3_identity::CaseKey;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelLabels {
    pub type1: String,
    pub type2: String,
    pub type3: String,
    pub entero: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedRecord {
    pub case_key: CaseKey,
    pub idcode2: String,
    pub year: String,
    pub labels: ChannelLabels,
    pub result: String,
    pub wpv1: bool,
    pub linelist: bool,
}

impl ClassifiedRecord {
    pub fn wpv1_count(&self) -> u8 {
        u8::from(self.wpv1)
    }

    pub fn linelist_flag(&self) -> u8 {
        u8::from(self.linelist)
    }
}
