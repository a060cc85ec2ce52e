pub mod arc_length;
pub mod catmull_rom;
