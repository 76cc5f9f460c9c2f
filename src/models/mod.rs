pub mod admin;
pub mod course;
pub mod feedback;
pub mod pagination;
pub mod registration;
pub mod settings;
pub mod student;
pub mod teacher;
pub mod timetable;

pub use admin::{Admin, AdminProfile, ChangePasswordRequest, LoginRequest, RegisterAdminRequest, UpdateProfileRequest};
pub use course::{CourseFilter, CourseMaterial, CourseMaterialRequest};
pub use feedback::{Feedback, FeedbackFilter, FeedbackStats, NewFeedback, NewFeedbackRequest, UpdateFeedbackRequest};
pub use pagination::{Page, PageInfo, Pagination};
pub use registration::{RegistrationLink, RegistrationLinkRequest};
pub use settings::{AppSettings, UpdateSettingsRequest};
pub use student::{NewStudentRequest, Student, StudentQuery, UpdateStudentRequest};
pub use teacher::{NewTeacherRequest, Teacher, UpdateTeacherRequest};
pub use timetable::{TimetableEntry, TimetableEntryRequest, TimetableFilter, TimetableSlot, TimetableStats};

/// Trims and drops empty strings, so `""` in a JSON body reads as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
