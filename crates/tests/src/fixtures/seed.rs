use bson::oid::ObjectId;

use super::test_app::TestApp;

/// A seeded space with an admin, a regular member and a non-member.
pub struct SeededSpace {
    pub space_id: ObjectId,
    pub admin: SeededUser,
    pub member: SeededUser,
    pub outsider: SeededUser,
}

pub struct SeededUser {
    pub id: ObjectId,
    pub access_token: String,
}

impl TestApp {
    /// Mint an access token for a fresh user id. Registration/login flows
    /// are out of scope, so tests go straight to the token.
    pub fn seed_user(&self, username: &str) -> SeededUser {
        let id = ObjectId::new();
        let access_token = self
            .state
            .auth
            .generate_access_token(id, &format!("{username}@example.com"), username)
            .expect("Failed to mint access token");

        SeededUser { id, access_token }
    }

    /// Create a space with an admin and one added member; the outsider
    /// holds a valid token but belongs to no space.
    pub async fn seed_space(&self, name: &str) -> SeededSpace {
        let admin = self.seed_user(&format!("{name}-admin"));
        let member = self.seed_user(&format!("{name}-member"));
        let outsider = self.seed_user(&format!("{name}-outsider"));

        let space = self
            .state
            .spaces
            .create(name.to_string(), admin.id)
            .await
            .expect("Failed to create space");
        let space_id = space.id.expect("Space should have an id");

        self.state
            .spaces
            .add_member(space_id, member.id)
            .await
            .expect("Failed to add member");

        SeededSpace {
            space_id,
            admin,
            member,
            outsider,
        }
    }

    /// Create a meeting in the space, optionally with a stored transcript.
    pub async fn seed_meeting(
        &self,
        space_id: ObjectId,
        title: &str,
        transcript: Option<&str>,
    ) -> ObjectId {
        let meeting = self
            .state
            .meetings
            .create(space_id, title.to_string(), None)
            .await
            .expect("Failed to create meeting");
        let meeting_id = meeting.id.expect("Meeting should have an id");

        if let Some(transcript) = transcript {
            self.state
                .meetings
                .set_transcript(meeting_id, transcript)
                .await
                .expect("Failed to store transcript");
        }

        meeting_id
    }
}
