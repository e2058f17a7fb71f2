pub mod bitmap_font;
pub mod font;
pub mod icon_gen;
