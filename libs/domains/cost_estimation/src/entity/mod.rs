//! Sea-ORM entities for the reference tables.

pub mod electrical_cost;
pub mod quality_material;
pub mod quality_material_quantity;
pub mod standard_material;
