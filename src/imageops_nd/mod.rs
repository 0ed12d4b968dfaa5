pub mod boundary;
pub mod box_filter;
pub mod image;
pub mod inner_product;
pub mod interpolate;
pub mod morphology;
pub mod neighborhood;
pub mod operator;
pub mod operator_filter;
pub mod padding;
pub mod pixel;
