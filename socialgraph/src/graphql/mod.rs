//! GraphQL schema using async-graphql
//!
//! Object types mirror the database rows; root fields are thin wrappers over
//! a single storage call and relation fields go through DataLoaders.

mod depth;
mod error;
mod inputs;
mod loaders;
mod member_type;
mod post;
mod profile;
mod schema;
mod subscription;
mod user;

pub use depth::{DepthLimit, check_depth};
pub use error::{BAD_USER_INPUT, CONSTRAINT_VIOLATION_MESSAGE, INTERNAL_SERVER_ERROR, NOT_FOUND};
pub use inputs::{
    ChangePostInput, ChangeProfileInput, ChangeUserInput, CreatePostInput, CreateProfileInput,
    CreateUserInput, MemberTypeId,
};
pub use loaders::{
    AuthorsBySubscriberLoader, MemberTypeLoader, PostsByAuthorLoader, ProfileByUserLoader,
    ProfilesByMemberTypeLoader, SubscribersByAuthorLoader,
};
pub use member_type::{MemberType, MemberTypeQuery};
pub use post::{Post, PostMutation, PostQuery};
pub use profile::{Profile, ProfileMutation, ProfileQuery};
pub use schema::{AppSchema, Mutations, RootQuery, SchemaLimits, build_schema};
pub use subscription::SubscriptionMutation;
pub use user::{User, UserMutation, UserQuery};
