pub mod point;
pub mod point_cloud;
pub mod vector;
