#[cfg(feature = "desktop")]
pub mod detector;
pub mod filter;
pub mod joint;
pub mod movenet;
#[cfg(feature = "desktop")]
pub mod preprocess;

#[cfg(feature = "desktop")]
pub use detector::PoseDetector;
pub use filter::{filter_keypoints, CONFIDENCE_THRESHOLD};
pub use joint::{JointName, Keypoint, ObservedSkeleton, Point2};
pub use movenet::skeleton_from_movenet;
#[cfg(feature = "desktop")]
pub use preprocess::preprocess_for_movenet;
