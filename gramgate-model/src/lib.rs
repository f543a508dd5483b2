//! Core data types shared across Gramgate crates.

pub mod envelope;
pub mod manifest;
pub mod requests;

// Intentionally curated re-exports for downstream consumers.
pub use envelope::{Envelope, Outcome};
pub use manifest::Manifest;
pub use requests::{
    DeleteMessageRequest, DownloadMediaRequest, DownloadSharedPostRequest,
    LikeMediaRequest, ListChatsRequest, ListMediaMessagesRequest,
    ListMessagesRequest, MarkMessageSeenRequest, MuteConversationRequest,
    OnlineStatusRequest, PendingChatsParams, SearchThreadsRequest,
    SearchUsersRequest, SendMessageRequest, SendPhotoRequest,
    SendVideoRequest, ThreadByParticipantsRequest, ThreadDetailsRequest,
    UserFollowersRequest, UserFollowingRequest, UserPostsRequest,
    UserStoriesRequest,
};
