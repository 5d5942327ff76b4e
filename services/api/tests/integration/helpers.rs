use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use mol_api::domain::repository::{
    AccountRepository, BlogPostRepository, ContactRepository, CourseRepository,
    NewsletterRepository, Notifier, TeamMemberRepository,
};
use mol_api::domain::types::{
    Account, AccountStatistics, BlogPost, BlogPostDraft, BlogPostPatch, ContactMessage, Course,
    CourseDraft, CoursePatch, NewContactMessage, NewsletterSubscription, OutgoingEmail,
    ProfilePatch, TeamMember, TeamMemberDraft, TeamMemberPatch,
};
use mol_api::error::ApiError;
use mol_api::usecase::password::PasswordHasher;
use mol_domain::pagination::PageWindow;
use mol_domain::role::Role;

pub const PORTAL_BASE: &str = "https://portal.example.com";
pub const TEST_PASSWORD: &str = "CorrectHorse1";

fn window_of<T: Clone>(items: &[T], window: PageWindow) -> Vec<T> {
    items
        .iter()
        .skip(window.offset as usize)
        .take(window.page_size as usize)
        .cloned()
        .collect()
}

// ── MockAccountRepo ──────────────────────────────────────────────────────────

pub struct MockAccountRepo {
    pub accounts: Arc<Mutex<Vec<Account>>>,
}

impl MockAccountRepo {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self {
            accounts: Arc::new(Mutex::new(accounts)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Returns a shared handle to the internal account list for post-execution inspection.
    pub fn accounts_handle(&self) -> Arc<Mutex<Vec<Account>>> {
        Arc::clone(&self.accounts)
    }

    fn find(&self, pred: impl Fn(&Account) -> bool) -> Option<Account> {
        self.accounts.lock().unwrap().iter().find(|a| pred(a)).cloned()
    }

    fn modify(&self, id: Uuid, f: impl FnOnce(&mut Account)) -> bool {
        let mut accounts = self.accounts.lock().unwrap();
        match accounts.iter_mut().find(|a| a.id == id) {
            Some(account) => {
                f(account);
                true
            }
            None => false,
        }
    }
}

impl AccountRepository for MockAccountRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, ApiError> {
        Ok(self.find(|a| a.id == id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, ApiError> {
        Ok(self.find(|a| a.email == email))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, ApiError> {
        Ok(self.find(|a| a.username == username))
    }

    async fn create(&self, account: &Account) -> Result<(), ApiError> {
        self.accounts.lock().unwrap().push(account.clone());
        Ok(())
    }

    async fn set_verification_token(
        &self,
        id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), ApiError> {
        self.modify(id, |a| {
            a.verification_token = Some(token.to_owned());
            a.verification_token_expires_at = Some(expires_at);
        });
        Ok(())
    }

    async fn consume_verification_token(&self, token: &str) -> Result<bool, ApiError> {
        let mut accounts = self.accounts.lock().unwrap();
        match accounts
            .iter_mut()
            .find(|a| a.verification_token.as_deref() == Some(token))
        {
            Some(account) => {
                account.is_verified = true;
                account.verification_token = None;
                account.verification_token_expires_at = None;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_reset_token(
        &self,
        id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), ApiError> {
        self.modify(id, |a| {
            a.reset_password_token = Some(token.to_owned());
            a.reset_token_expires_at = Some(expires_at);
        });
        Ok(())
    }

    async fn find_by_reset_token(&self, token: &str) -> Result<Option<Account>, ApiError> {
        Ok(self.find(|a| a.reset_password_token.as_deref() == Some(token)))
    }

    async fn consume_reset_token(
        &self,
        token: &str,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, ApiError> {
        let mut accounts = self.accounts.lock().unwrap();
        match accounts.iter_mut().find(|a| {
            a.reset_password_token.as_deref() == Some(token)
                && a.reset_token_expires_at.is_none_or(|exp| exp >= now)
        }) {
            Some(account) => {
                account.password_hash = password_hash.to_owned();
                account.reset_password_token = None;
                account.reset_token_expires_at = None;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), ApiError> {
        self.modify(id, |a| a.password_hash = password_hash.to_owned());
        Ok(())
    }

    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), ApiError> {
        self.modify(id, |a| a.last_login = Some(at));
        Ok(())
    }

    async fn update_profile(&self, id: Uuid, patch: &ProfilePatch) -> Result<(), ApiError> {
        self.modify(id, |a| {
            if let Some(v) = &patch.firstname {
                a.firstname = v.clone();
            }
            if let Some(v) = &patch.lastname {
                a.lastname = v.clone();
            }
            if let Some(v) = &patch.middlename {
                a.middlename = Some(v.clone());
            }
            if let Some(v) = &patch.phonenumber {
                a.phonenumber = Some(v.clone());
            }
        });
        Ok(())
    }

    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<bool, ApiError> {
        Ok(self.modify(id, |a| a.is_active = is_active))
    }

    async fn count(&self) -> Result<u64, ApiError> {
        Ok(self.accounts.lock().unwrap().len() as u64)
    }

    async fn list(&self, window: PageWindow) -> Result<Vec<Account>, ApiError> {
        let mut accounts = self.accounts.lock().unwrap().clone();
        accounts.sort_by(|a, b| b.date_joined.cmp(&a.date_joined));
        Ok(window_of(&accounts, window))
    }

    async fn statistics(&self) -> Result<AccountStatistics, ApiError> {
        let accounts = self.accounts.lock().unwrap();
        let total = accounts.len() as u64;
        let active = accounts.iter().filter(|a| a.is_active).count() as u64;
        Ok(AccountStatistics {
            total_users: total,
            active_users: active,
            inactive_users: total - active,
            verified_users: accounts.iter().filter(|a| a.is_verified).count() as u64,
        })
    }
}

// ── MockNewsletterRepo ───────────────────────────────────────────────────────

pub struct MockNewsletterRepo {
    pub subscriptions: Arc<Mutex<Vec<NewsletterSubscription>>>,
}

impl MockNewsletterRepo {
    pub fn new(subscriptions: Vec<NewsletterSubscription>) -> Self {
        Self {
            subscriptions: Arc::new(Mutex::new(subscriptions)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn subscriptions_handle(&self) -> Arc<Mutex<Vec<NewsletterSubscription>>> {
        Arc::clone(&self.subscriptions)
    }
}

impl NewsletterRepository for MockNewsletterRepo {
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<NewsletterSubscription>, ApiError> {
        Ok(self
            .subscriptions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.email == email)
            .cloned())
    }

    async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<NewsletterSubscription>, ApiError> {
        Ok(self
            .subscriptions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.verification_token.as_deref() == Some(token))
            .cloned())
    }

    async fn create(&self, email: &str, token: &str) -> Result<NewsletterSubscription, ApiError> {
        let mut subs = self.subscriptions.lock().unwrap();
        let sub = NewsletterSubscription {
            id: subs.len() as i32 + 1,
            email: email.to_owned(),
            verification_token: Some(token.to_owned()),
            is_verified: false,
            registration_date: Utc::now(),
        };
        subs.push(sub.clone());
        Ok(sub)
    }

    async fn set_token(&self, id: i32, token: &str) -> Result<(), ApiError> {
        let mut subs = self.subscriptions.lock().unwrap();
        if let Some(sub) = subs.iter_mut().find(|s| s.id == id) {
            sub.verification_token = Some(token.to_owned());
        }
        Ok(())
    }

    async fn consume_token(&self, token: &str) -> Result<bool, ApiError> {
        let mut subs = self.subscriptions.lock().unwrap();
        match subs
            .iter_mut()
            .find(|s| !s.is_verified && s.verification_token.as_deref() == Some(token))
        {
            Some(sub) => {
                sub.is_verified = true;
                sub.verification_token = None;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── MockContactRepo ──────────────────────────────────────────────────────────

pub struct MockContactRepo {
    pub messages: Arc<Mutex<Vec<ContactMessage>>>,
}

impl MockContactRepo {
    pub fn empty() -> Self {
        Self {
            messages: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn messages_handle(&self) -> Arc<Mutex<Vec<ContactMessage>>> {
        Arc::clone(&self.messages)
    }
}

impl ContactRepository for MockContactRepo {
    async fn create(&self, message: &NewContactMessage) -> Result<ContactMessage, ApiError> {
        let mut messages = self.messages.lock().unwrap();
        let stored = ContactMessage {
            id: messages.len() as i32 + 1,
            name: message.name.clone(),
            email: message.email.clone(),
            subject: message.subject.clone(),
            message: message.message.clone(),
            created_at: Utc::now(),
        };
        messages.push(stored.clone());
        Ok(stored)
    }
}

// ── MockCourseRepo ───────────────────────────────────────────────────────────

pub struct MockCourseRepo {
    pub courses: Arc<Mutex<Vec<Course>>>,
}

impl MockCourseRepo {
    pub fn new(courses: Vec<Course>) -> Self {
        Self {
            courses: Arc::new(Mutex::new(courses)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn courses_handle(&self) -> Arc<Mutex<Vec<Course>>> {
        Arc::clone(&self.courses)
    }
}

impl CourseRepository for MockCourseRepo {
    async fn count(&self) -> Result<u64, ApiError> {
        Ok(self.courses.lock().unwrap().len() as u64)
    }

    async fn list(&self, window: PageWindow) -> Result<Vec<Course>, ApiError> {
        let mut courses = self.courses.lock().unwrap().clone();
        courses.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(window_of(&courses, window))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Course>, ApiError> {
        Ok(self
            .courses
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn create(&self, draft: &CourseDraft) -> Result<Course, ApiError> {
        let mut courses = self.courses.lock().unwrap();
        let now = Utc::now();
        let course = Course {
            id: courses.len() as i32 + 1,
            title: draft.title.clone(),
            description: draft.description.clone(),
            url: draft.url.clone(),
            thumbnail_url: draft.thumbnail_url.clone(),
            created_at: now,
            updated_at: now,
        };
        courses.push(course.clone());
        Ok(course)
    }

    async fn update(&self, id: i32, patch: &CoursePatch) -> Result<Option<Course>, ApiError> {
        let mut courses = self.courses.lock().unwrap();
        let Some(course) = courses.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        if let Some(title) = &patch.title {
            course.title = title.clone();
        }
        if let Some(description) = &patch.description {
            course.description = Some(description.clone());
        }
        course.updated_at = Utc::now();
        Ok(Some(course.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let mut courses = self.courses.lock().unwrap();
        let before = courses.len();
        courses.retain(|c| c.id != id);
        Ok(courses.len() < before)
    }
}

// ── MockTeamRepo ─────────────────────────────────────────────────────────────

pub struct MockTeamRepo {
    pub members: Arc<Mutex<Vec<TeamMember>>>,
}

impl MockTeamRepo {
    pub fn new(members: Vec<TeamMember>) -> Self {
        Self {
            members: Arc::new(Mutex::new(members)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn members_handle(&self) -> Arc<Mutex<Vec<TeamMember>>> {
        Arc::clone(&self.members)
    }
}

impl TeamMemberRepository for MockTeamRepo {
    async fn count(&self) -> Result<u64, ApiError> {
        Ok(self.members.lock().unwrap().len() as u64)
    }

    async fn list(&self, window: PageWindow) -> Result<Vec<TeamMember>, ApiError> {
        let mut members = self.members.lock().unwrap().clone();
        members.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(window_of(&members, window))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<TeamMember>, ApiError> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    async fn create(&self, draft: &TeamMemberDraft) -> Result<TeamMember, ApiError> {
        let mut members = self.members.lock().unwrap();
        let now = Utc::now();
        let member = TeamMember {
            id: members.len() as i32 + 1,
            full_name: draft.full_name.clone(),
            occupation: draft.occupation.clone(),
            bio: draft.bio.clone(),
            avatar_url: draft.avatar_url.clone(),
            email_url: draft.email_url.clone(),
            linkedin_url: draft.linkedin_url.clone(),
            created_at: now,
            updated_at: now,
        };
        members.push(member.clone());
        Ok(member)
    }

    async fn update(
        &self,
        id: i32,
        patch: &TeamMemberPatch,
    ) -> Result<Option<TeamMember>, ApiError> {
        let mut members = self.members.lock().unwrap();
        let Some(member) = members.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };
        if let Some(full_name) = &patch.full_name {
            member.full_name = full_name.clone();
        }
        if let Some(occupation) = &patch.occupation {
            member.occupation = occupation.clone();
        }
        if let Some(bio) = &patch.bio {
            member.bio = Some(bio.clone());
        }
        if let Some(email_url) = &patch.email_url {
            member.email_url = Some(email_url.clone());
        }
        member.updated_at = Utc::now();
        Ok(Some(member.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let mut members = self.members.lock().unwrap();
        let before = members.len();
        members.retain(|m| m.id != id);
        Ok(members.len() < before)
    }
}

// ── MockBlogRepo ─────────────────────────────────────────────────────────────

pub struct MockBlogRepo {
    pub posts: Arc<Mutex<Vec<BlogPost>>>,
}

impl MockBlogRepo {
    pub fn new(posts: Vec<BlogPost>) -> Self {
        Self {
            posts: Arc::new(Mutex::new(posts)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn posts_handle(&self) -> Arc<Mutex<Vec<BlogPost>>> {
        Arc::clone(&self.posts)
    }
}

impl BlogPostRepository for MockBlogRepo {
    async fn count(&self) -> Result<u64, ApiError> {
        Ok(self.posts.lock().unwrap().len() as u64)
    }

    async fn list(&self, window: PageWindow) -> Result<Vec<BlogPost>, ApiError> {
        let mut posts = self.posts.lock().unwrap().clone();
        posts.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(window_of(&posts, window))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<BlogPost>, ApiError> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn create(&self, draft: &BlogPostDraft) -> Result<BlogPost, ApiError> {
        let mut posts = self.posts.lock().unwrap();
        let now = Utc::now();
        let post = BlogPost {
            id: posts.len() as i32 + 1,
            title: draft.title.clone(),
            description: draft.description.clone(),
            body: draft.body.clone(),
            thumbnail_url: draft.thumbnail_url.clone(),
            created_by: draft.created_by,
            creator_fullname: String::new(),
            date_uploaded: now,
            updated_at: now,
        };
        posts.push(post.clone());
        Ok(post)
    }

    async fn update(&self, id: i32, patch: &BlogPostPatch) -> Result<Option<BlogPost>, ApiError> {
        let mut posts = self.posts.lock().unwrap();
        let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(title) = &patch.title {
            post.title = title.clone();
        }
        if let Some(body) = &patch.body {
            post.body = body.clone();
        }
        post.updated_at = Utc::now();
        Ok(Some(post.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() < before)
    }
}

// ── RecordingNotifier ────────────────────────────────────────────────────────

/// Records every email; optionally fails every send.
pub struct RecordingNotifier {
    pub sent: Arc<Mutex<Vec<OutgoingEmail>>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(vec![])),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn sent_handle(&self) -> Arc<Mutex<Vec<OutgoingEmail>>> {
        Arc::clone(&self.sent)
    }
}

impl Notifier for RecordingNotifier {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), ApiError> {
        if self.fail {
            return Err(ApiError::Internal(anyhow::anyhow!("mail relay unavailable")));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

/// Single-iteration hasher; production strength is irrelevant in tests.
pub fn test_hasher() -> PasswordHasher {
    PasswordHasher::new(1)
}

pub fn test_account() -> Account {
    Account {
        id: Uuid::parse_str("00000000-0000-0000-0000-000000000001").unwrap(),
        email: "ada@example.com".to_owned(),
        username: "ada".to_owned(),
        password_hash: test_hasher().hash(TEST_PASSWORD),
        role: Some(Role::Member),
        firstname: "Ada".to_owned(),
        lastname: "Lovelace".to_owned(),
        middlename: None,
        phonenumber: None,
        is_active: true,
        is_verified: true,
        verification_token: None,
        verification_token_expires_at: None,
        reset_password_token: None,
        reset_token_expires_at: None,
        date_joined: Utc::now(),
        last_login: None,
    }
}

pub fn unverified_account() -> Account {
    Account {
        is_verified: false,
        ..test_account()
    }
}

pub fn account_with_role(id: u128, role: Option<Role>) -> Account {
    Account {
        id: Uuid::from_u128(id),
        email: format!("user{id}@example.com"),
        username: format!("user{id}"),
        role,
        ..test_account()
    }
}

pub fn test_course(id: i32) -> Course {
    let now = Utc::now();
    Course {
        id,
        title: format!("Course {id}"),
        description: None,
        url: None,
        thumbnail_url: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_team_member(id: i32) -> TeamMember {
    let now = Utc::now();
    TeamMember {
        id,
        full_name: format!("Member {id}"),
        occupation: "Instructor".to_owned(),
        bio: None,
        avatar_url: None,
        email_url: None,
        linkedin_url: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_post(id: i32, author: Uuid) -> BlogPost {
    let now = Utc::now();
    BlogPost {
        id,
        title: format!("Post {id}"),
        description: None,
        body: "Body".to_owned(),
        thumbnail_url: None,
        created_by: author,
        creator_fullname: "Ada Lovelace".to_owned(),
        date_uploaded: now,
        updated_at: now,
    }
}

/// Last path segment of the first link in `email`.
pub fn token_from_email(email: &OutgoingEmail) -> String {
    let start = email.body.find("href='").map(|i| i + "href='".len()).unwrap();
    let end = email.body[start..].find('\'').unwrap() + start;
    email.body[start..end].rsplit('/').next().unwrap().to_owned()
}
