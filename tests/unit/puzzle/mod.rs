mod gallery;
mod geometry;
