// ==========================================
// DAWA 地址导入 - 领域模型层
// ==========================================
// 职责: 定义地址实体与领域类型
// 红线: 不含解析逻辑，不含 I/O
// ==========================================

pub mod address;
pub mod types;

// 重导出核心类型
pub use address::{
    derive_kvh, AccessAddress, AccessPoint, Address, CadastralDistrict, CourtDistrictRef,
    ElectoralDistrictRef, GridCells, History, MunicipalityRef, ParishRef, PoliceDistrictRef,
    PostalCodeRef, Reference, RegionRef, StreetRef, KVH_LEN,
};
pub use types::{AddressStatus, Zone};
