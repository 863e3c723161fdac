//! GROQ query templates, one per request kind.
//!
//! Templates are fixed text; request values only ever travel as `$params`.

/// Latest site settings with menus, icons and images expanded
pub const SITE_SETTINGS: &str = r#"
*[_type == "siteSettings"] | order(_updatedAt desc)[0] {
  ...,
  favicon {
    favicon { asset-> },
    faviconPng { asset-> },
    faviconDarkPng { asset-> },
    appleTouchIcon { asset-> },
    androidIcon { asset-> }
  },
  footerLogos[] { ..., asset-> },
  certificationLogo { ..., asset-> },
  ftCreditLogo { ..., asset-> },
  menuBackgroundImage { ..., asset-> },
  preloaderImages[] {
    "image": select(
      _type == "image" => @,
      defined(image) => image,
      @
    ) { ..., asset-> },
    alt,
    repeatLeftRight
  },
  logotype {
    ...,
    asset-> { _id, url, mimeType, metadata { dimensions } },
    alt
  },
  mainNavigationMenu-> {
    _id,
    title,
    items[] {
      ...,
      to {
        ...,
        page-> { _id, slug { current }, title }
      }
    }
  },
  disablePreloader,
  contactInfo[] { label, value }
}
"#;

/// Menu by title; `$menuTitle`
pub const MENU_BY_TITLE: &str = r#"
*[_type == "menu" && title == $menuTitle][0] {
  ...,
  items[] {
    ...,
    _key,
    text,
    to {
      ...,
      page-> { _id, slug { current }, title }
    }
  }
}
"#;

/// Page by route name, unprojected; `$identifier`
pub const PAGE_BY_ROUTE_NAME: &str = r#"*[_type == "page" && routeName == $identifier][0]"#;

/// Page by slug with every section variant projected; `$identifier`
pub const PAGE_BY_SLUG: &str = r#"
*[_type == "page" && slug.current == $identifier][0] {
  _id,
  title,
  slug,
  featuredImage {
    asset-> { _id, url, metadata { dimensions } },
    alt
  },
  shortDescription,
  sections[]-> {
    _id,
    _type,
    title,
    sectionType,
    heroContent {
      image { asset-> { _id, url, metadata { dimensions } } }
    },
    basicContent {
      title,
      content,
      pdf { asset-> { _id, url, metadata { dimensions } } }
    },
    imageContent {
      image { asset-> { _id, url, metadata { dimensions } } },
      constrainHeight,
      alignment,
      columns,
      grid
    },
    sectionImagesContent {
      enablePadding,
      items[] {
        image { asset-> { _id, url, metadata { dimensions } } },
        objectFit,
        alignment,
        width
      }
    },
    tipsFromTheTableContent { title },
    reviewsContent {
      backgroundColor,
      textColor,
      items[] { reviewContent, cite, showStars, showQuotes }
    },
    instagramContent {
      sectionImage { asset-> },
      linkText,
      linkUrl,
      items[] { image { asset-> } }
    },
    headlineContent {
      headline,
      centerText,
      centerBlock,
      paddingBottom,
      showArrow,
      button { text, url }
    },
    contactContent {
      content,
      items[] { _key, label, value },
      ftCreditLogo { asset-> { _id, url } },
      decorativeImage {
        asset-> { _id, url, metadata { dimensions } },
        alt
      }
    },
    homeScrollContent {
      items[] {
        _key,
        title,
        image { asset-> { _id, url, metadata { dimensions } } },
        link {
          page-> { slug { current } },
          url
        }
      }
    },
    twoColumnContent {
      mainImage { asset-> { _id, url, metadata { dimensions } } },
      overlayImage { asset-> { _id, url, metadata { dimensions } } },
      roundalImage { asset-> { _id, url, metadata { dimensions } } },
      includeLogo,
      logoImage { asset-> { _id, url, metadata { dimensions } } },
      text,
      enableBookingButton,
      imageRight,
      backgroundColor,
      textColor,
      textImage { asset-> { _id, url, metadata { dimensions } } }
    },
    nestedContent {
      mainImage { asset-> { _id, url, metadata { dimensions } } },
      iconImage { asset-> { _id, url, metadata { dimensions } } },
      content,
      backgroundColor,
      textColor
    },
    bannerContent {
      image { asset-> { _id, url, metadata { dimensions } } },
      content
    },
    newsContent { topText },
    selectedNewsContent {
      title,
      news[]-> {
        _id,
        title,
        publishedAt,
        summary,
        content,
        featuredImage { asset-> { _id, url, metadata { dimensions } } },
        offsiteUrl,
        linkTitle
      },
      button {
        text,
        page-> { slug },
        url
      }
    },
    quoteContent { quote, cite, alignment },
    googleMapContent { latitude, longitude, zoom, mapHeight, googleMapsLink },
    textContent {
      title,
      image {
        asset-> { _id, url, metadata { dimensions } },
        alt
      },
      content,
      columns,
      offset,
      splitTitle,
      splitTitleLeft,
      splitTitleRight
    },
    marqueeContent { linkTitle, linkUrl, repeatCount, marqueeSpeed, reverse },
    serviceLinksContent {
      enablePaddingTopBottom,
      enablePaddingLeftRight,
      items[] {
        image { asset-> { _id, url, metadata { dimensions } } },
        title,
        linkTitle,
        url,
        targetBlank
      }
    },
    dualCarouselContent {
      leftCarousel[] { _type, asset-> { _id, url, metadata { dimensions } }, alt },
      leftOverlay { asset-> { _id, url, metadata { dimensions } }, alt },
      rightCarousel[] { _type, asset-> { _id, url, metadata { dimensions } }, alt },
      rightOverlay { asset-> { _id, url, metadata { dimensions } }, alt },
      carouselSpeed,
      transitionDuration
    },
    singleCarouselContent {
      carousel[] { _type, asset-> { _id, url, metadata { dimensions } }, alt },
      overlay { asset-> { _id, url, metadata { dimensions } }, alt },
      carouselSpeed,
      transitionDuration,
      enableBookingButton,
      enableFixedBackground,
      enablePaddingTopBottom,
      enablePaddingLeftRight,
      topBackgroundColor,
      bottomBackgroundColor
    },
    uspsContent {
      items[] {
        image { asset-> { _id, url, metadata { dimensions } } },
        title,
        description
      }
    },
    serviceContent {
      service-> {
        _id,
        title,
        description,
        bookingLink,
        subservices[] { title, duration, cost }
      },
      alignment,
      testimonial { quote, cite }
    },
    horizontalCarouselContent {
      items[] {
        _type,
        asset { asset-> { _id, url, metadata { dimensions } } },
        alt,
        poster { asset-> { _id, url, metadata { dimensions } } }
      }
    },
    selectedPagesContent {
      title,
      pages[]-> {
        _id,
        title,
        slug { current },
        featuredImage {
          asset-> { _id, url, metadata { dimensions } },
          alt
        },
        shortDescription
      }
    }
  }
}
"#;

const SECTION_PROJECTION: &str = r#"{
  ...,
  heroContent {
    ...,
    heroElements[] {
      ...,
      image { ..., asset-> }
    }
  },
  homeScrollContent {
    ...,
    items[] {
      ...,
      image { ..., asset-> },
      link {
        ...,
        page-> { _id, title, slug }
      }
    }
  },
  selectedServicesContent {
    services[]-> {
      _id,
      title,
      image { asset-> { _id, url, mimeType } },
      description
    },
    button {
      text,
      page-> { slug },
      url
    }
  }
}"#;

/// Standalone section by type; `$sectionType`, plus `$title` when `with_title`
pub fn section(with_title: bool) -> String {
    let title_filter = if with_title { " && title == $title" } else { "" };
    format!(
        "*[_type == \"section\" && sectionType == $sectionType{title_filter}][0] {SECTION_PROJECTION}"
    )
}

pub const SECTION_HOME_SCROLL: &str = r#"*[_type == "sectionHomeScroll"][0]{..., items[]{..., link{..., page-> { _id, slug, title }}}}"#;

const NEWS_PROJECTION: &str = r#"{
  _id,
  title,
  publishedAt,
  summary,
  content,
  excerpt,
  category,
  featuredImage { asset-> { _id, url, metadata { dimensions } } },
  offsiteUrl,
  linkTitle
}"#;

/// Newest first, optionally capped at `limit` entries
pub fn news(limit: Option<u32>) -> String {
    let slice = limit.map(|n| format!("[0...{n}]")).unwrap_or_default();
    format!("*[_type == \"news\"] | order(publishedAt desc){slice} {NEWS_PROJECTION}")
}

pub const SERVICES: &str = r#"
*[_type == "service"] | order(orderRank) {
  _id,
  title,
  description,
  bookingLink,
  subservices[] { title, duration, cost }
}
"#;

pub const TEAM: &str = r#"
*[_type == "team"] | order(orderRank asc) {
  _id,
  name,
  role,
  bio,
  "imageUrl": image.asset->url,
  "imageAlt": image.alt,
  orderRank
}
"#;

pub const TIPS: &str = r#"
*[_type == "tips"] | order(orderRank asc) {
  title,
  content,
  image { asset-> },
  backgroundImage { asset-> },
  link { text, url, targetBlank },
  orderRank
}
"#;

pub const GALLERIES: &str = r#"
*[_type == "gallery"] | order(orderRank asc) {
  _id,
  title,
  "thumbnail": items[0] { asset-> },
  "itemCount": count(items)
}
"#;

/// Gallery by document id; `$id`
pub const GALLERY_BY_ID: &str = r#"
*[_type == "gallery" && _id == $id][0] {
  _id,
  title,
  items[] { _type, asset-> }
}
"#;
