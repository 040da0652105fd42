#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use segview_image as image;

#[doc(inline)]
pub use segview_imgproc as imgproc;

#[doc(inline)]
pub use segview_io as io;

#[doc(inline)]
pub use segview_annotate as annotate;

#[doc(inline)]
pub use segview_viewer as viewer;

#[doc(inline)]
pub use segview_serve as serve;
